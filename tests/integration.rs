use tarot_reader::{
    ai::{MockReadingClient, ReadingService},
    app::{App, AppServices},
    models::ReadingRequest,
    reading::{Phase, ReadingEvent, ReadingSession, FALLBACK_READING},
    Error,
};

#[tokio::test]
async fn test_full_workflow_with_mocks() {
    let reader = MockReadingClient::new()
        .with_reading_response("The Fool opens the path, the Star lights it.".to_string());

    // Visitor fills in the form
    let mut session = ReadingSession::new();
    session
        .apply(ReadingEvent::QuestionChanged(
            "Should I take the new job?".to_string(),
        ))
        .unwrap();
    session.apply(ReadingEvent::CardCountChanged(2)).unwrap();
    session
        .apply(ReadingEvent::CardNameChanged {
            index: 0,
            name: "The Fool".to_string(),
        })
        .unwrap();
    session
        .apply(ReadingEvent::CardNameChanged {
            index: 1,
            name: "The Star".to_string(),
        })
        .unwrap();

    // Submit validates and hands over the draw
    let pending = session.begin_submit().unwrap();
    assert!(session.is_loading());
    assert_eq!(pending.cards, ["The Fool", "The Star"]);

    // One provider call, then completion
    let outcome = reader
        .generate_reading(&pending.question, &pending.cards)
        .await;
    session.complete(&pending, outcome);

    assert_eq!(
        session.reading(),
        Some("The Fool opens the path, the Star lights it.")
    );
    assert_eq!(reader.get_call_count(), 1);
}

#[tokio::test]
async fn test_app_returns_reading_and_forwards_draw_in_order() {
    let reader = MockReadingClient::new();
    let app = App::with_services(
        AppServices {
            reader: Box::new(reader.clone()),
        },
        "127.0.0.1".to_string(),
        0,
    );

    let reading = app
        .perform_reading(ReadingRequest {
            question: "Should I move abroad?".to_string(),
            card_count: 5,
            card_names: vec![
                "Two of Cups".to_string(),
                "".to_string(),
                "The Hermit".to_string(),
                "  ".to_string(),
                "Ace of Wands".to_string(),
            ],
        })
        .await
        .unwrap();

    assert!(reading.contains("Should I move abroad?"));

    let calls = reader.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].cards, ["Two of Cups", "The Hermit", "Ace of Wands"]);
}

#[tokio::test]
async fn test_app_validation_failures_never_reach_the_provider() {
    let reader = MockReadingClient::new();
    let app = App::with_services(
        AppServices {
            reader: Box::new(reader.clone()),
        },
        "127.0.0.1".to_string(),
        0,
    );

    let empty_question = ReadingRequest {
        question: String::new(),
        card_count: 1,
        card_names: vec!["The Fool".to_string()],
    };
    let no_cards = ReadingRequest {
        question: "What awaits me?".to_string(),
        card_count: 3,
        card_names: vec![],
    };

    for request in [empty_question, no_cards] {
        let err = app.perform_reading(request).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
    assert_eq!(reader.get_call_count(), 0);
}

#[tokio::test]
async fn test_provider_failure_leaves_session_resubmittable() {
    let reader = MockReadingClient::new()
        .with_error_response("rate limited".to_string())
        .with_reading_response("A calmer second draw.".to_string());

    let mut session = ReadingSession::new();
    session
        .apply(ReadingEvent::QuestionChanged("What awaits me?".to_string()))
        .unwrap();
    session
        .apply(ReadingEvent::CardNameChanged {
            index: 0,
            name: "The Tower".to_string(),
        })
        .unwrap();

    let pending = session.begin_submit().unwrap();
    let outcome = reader
        .generate_reading(&pending.question, &pending.cards)
        .await;
    session.complete(&pending, outcome);

    assert!(!session.is_loading());
    assert!(session.reading().is_none());
    assert!(matches!(session.phase(), Phase::Failed(_)));

    // Second attempt succeeds
    let pending = session.begin_submit().unwrap();
    let outcome = reader
        .generate_reading(&pending.question, &pending.cards)
        .await;
    session.complete(&pending, outcome);

    assert_eq!(session.reading(), Some("A calmer second draw."));
    assert_eq!(reader.get_call_count(), 2);
}

#[tokio::test]
async fn test_blank_provider_text_becomes_placeholder() {
    let reader = MockReadingClient::new().with_reading_response("\n  ".to_string());
    let app = App::with_services(
        AppServices {
            reader: Box::new(reader),
        },
        "127.0.0.1".to_string(),
        0,
    );

    let reading = app
        .perform_reading(ReadingRequest {
            question: "What awaits me?".to_string(),
            card_count: 1,
            card_names: vec!["The Moon".to_string()],
        })
        .await
        .unwrap();

    assert_eq!(reading, FALLBACK_READING);
}
