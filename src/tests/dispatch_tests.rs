    use super::*;

    use std::sync::mpsc::channel;

    const WAIT: Duration = Duration::from_secs(5);

    fn created(name: &str) -> impl FnOnce(ClientResult<()>) -> UiEvent + Send + 'static {
        let name = name.to_string();
        move |result| UiEvent::SpaceCreated { name, result }
    }

    #[test]
    fn results_arrive_tagged_with_their_screen() {
        let ui = UiLoop::new();
        let a = ui.open_screen("a").unwrap();
        let b = ui.open_screen("b").unwrap();
        assert_ne!(a.screen(), b.screen());

        b.submit("op", || Ok(()), created("from-b")).unwrap();
        let d = ui.next_timeout(WAIT).expect("delivery");
        assert_eq!(d.screen, b.screen());
        match d.event {
            UiEvent::SpaceCreated { name, result } => {
                assert_eq!(name, "from-b");
                assert!(result.is_ok());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn one_screen_runs_its_jobs_in_submission_order() {
        let ui = UiLoop::new();
        let d = ui.open_screen("ordered").unwrap();
        for i in 0..10 {
            d.submit("op", move || i, move |i: i32| UiEvent::SpaceCreated {
                name: i.to_string(),
                result: Ok(()),
            })
            .unwrap();
        }
        let mut seen = Vec::new();
        while seen.len() < 10 {
            let delivery = ui.next_timeout(WAIT).expect("delivery");
            if let UiEvent::SpaceCreated { name, .. } = delivery.event {
                seen.push(name);
            }
        }
        let expected: Vec<String> = (0..10).map(|i: i32| i.to_string()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn teardown_drops_in_flight_result_but_work_completes() {
        let ui = UiLoop::new();
        let mut d = ui.open_screen("closing").unwrap();
        let (release_tx, release_rx) = channel::<()>();
        let (done_tx, done_rx) = channel::<()>();

        d.submit(
            "slow",
            move || {
                let _ = release_rx.recv();
                let _ = done_tx.send(());
            },
            |()| UiEvent::SpaceDeleted {
                name: "x".to_string(),
                result: Ok(()),
            },
        )
        .unwrap();

        d.teardown();
        release_tx.send(()).unwrap();
        done_rx.recv_timeout(WAIT).expect("job ran to completion");
        assert!(ui.next_timeout(Duration::from_millis(200)).is_none());
    }

    #[test]
    fn result_posted_before_teardown_is_dropped_at_the_loop() {
        let ui = UiLoop::new();
        let mut d = ui.open_screen("late").unwrap();
        let scope = d.scope();
        let (done_tx, done_rx) = channel::<()>();
        d.submit(
            "fast",
            move || {
                let _ = done_tx.send(());
            },
            |()| UiEvent::Registered { result: Ok(()) },
        )
        .unwrap();
        done_rx.recv_timeout(WAIT).unwrap();
        // Give the worker time to post before the screen closes.
        std::thread::sleep(Duration::from_millis(100));

        d.teardown();
        assert!(!scope.is_live());
        assert!(ui.drain().is_empty());
    }

    #[test]
    fn submit_after_teardown_fails() {
        let ui = UiLoop::new();
        let mut d = ui.open_screen("gone").unwrap();
        d.teardown();
        let err = d
            .submit("op", || Ok(()), created("x"))
            .unwrap_err();
        assert!(matches!(err, ClientError::Io(_)), "{:?}", err);
    }

    #[test]
    fn screens_do_not_block_each_other() {
        let ui = UiLoop::new();
        let slow = ui.open_screen("slow").unwrap();
        let fast = ui.open_screen("fast").unwrap();
        let (release_tx, release_rx) = channel::<()>();

        slow.submit(
            "blocked",
            move || {
                let _ = release_rx.recv();
            },
            |()| UiEvent::Registered { result: Ok(()) },
        )
        .unwrap();
        fast.submit("quick", || Ok(()), created("quick")).unwrap();

        let first = ui.next_timeout(WAIT).expect("fast delivery");
        assert_eq!(first.screen, fast.screen());

        release_tx.send(()).unwrap();
        let second = ui.next_timeout(WAIT).expect("slow delivery");
        assert_eq!(second.screen, slow.screen());
    }

    #[test]
    fn waiting_on_one_screen_parks_the_others() {
        let ui = UiLoop::new();
        let a = ui.open_screen("a").unwrap();
        let b = ui.open_screen("b").unwrap();

        a.submit("op", || Ok(()), created("from-a")).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        b.submit("op", || Ok(()), created("from-b")).unwrap();

        let d = ui.next_for(b.screen(), WAIT).expect("delivery for b");
        assert_eq!(d.screen, b.screen());

        let d = ui.next_for(a.screen(), Duration::ZERO).expect("parked delivery for a");
        match d.event {
            UiEvent::SpaceCreated { name, .. } => assert_eq!(name, "from-a"),
            other => panic!("unexpected event {:?}", other),
        }
        assert!(ui.drain().is_empty());
    }

    #[test]
    fn parked_deliveries_die_with_their_screen() {
        let ui = UiLoop::new();
        let mut a = ui.open_screen("a").unwrap();
        let b = ui.open_screen("b").unwrap();

        a.submit("op", || Ok(()), created("from-a")).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        b.submit("op", || Ok(()), created("from-b")).unwrap();
        assert!(ui.next_for(b.screen(), WAIT).is_some());

        a.teardown();
        assert!(ui.try_next().is_none());
    }
