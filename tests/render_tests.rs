use chatbot_client::app::{App, AppEvent, Effect};
use chatbot_client::error::{ApiError, ApiOperation};
use chatbot_client::message::{
    ChatHistoryResponse, ChatMessage, ChatResponse, ChatSession, MessageRole,
};
use chatbot_client::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

fn draw(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn session(id: &str, name: &str) -> ChatSession {
    ChatSession {
        id: id.into(),
        session_name: name.into(),
        created_at: "2025-05-01T12:00:00Z".into(),
        updated_at: "2025-05-01T12:00:00Z".into(),
    }
}

fn message(id: &str, role: MessageRole, content: &str) -> ChatMessage {
    ChatMessage {
        id: id.into(),
        session_id: "s1".into(),
        role,
        content: content.into(),
        created_at: "2025-05-01T12:00:00Z".into(),
    }
}

/// Selects `s1` and loads `count` short messages into it.
fn long_conversation(count: usize) -> App {
    let mut app = App::default();
    let ticket = match app.select_session("s1").as_slice() {
        [Effect::LoadHistory(ticket)] => ticket.clone(),
        other => panic!("unexpected {other:?}"),
    };
    let messages = (0..count)
        .map(|i| {
            let role = if i % 2 == 0 { MessageRole::User } else { MessageRole::Assistant };
            message(&format!("m{i}"), role, &format!("line {i:02}"))
        })
        .collect();
    app.apply(AppEvent::HistoryLoaded {
        ticket,
        result: Ok(ChatHistoryResponse {
            session: session("s1", "Long chat"),
            messages,
        }),
    });
    app
}

#[test]
fn empty_session_list_shows_empty_state() {
    let app = App::default();
    let screen = draw(&app);
    assert!(screen.contains(ui::sidebar::EMPTY_STATE));
    assert!(screen.contains(ui::chat::EMPTY_TITLE));
    assert!(screen.contains("New Chat"));
}

#[test]
fn sessions_are_listed_by_name() {
    let mut app = App::default();
    app.apply(AppEvent::SessionsLoaded {
        seq: 1,
        result: Ok(vec![
            session("s1", "Trip planning"),
            session("s2", "Rust questions"),
        ]),
    });
    let screen = draw(&app);
    assert!(screen.contains("Trip planning"));
    assert!(screen.contains("Rust questions"));
    assert!(!screen.contains(ui::sidebar::EMPTY_STATE));
}

#[test]
fn pending_send_shows_message_and_typing_indicator() {
    let mut app = App::default();
    app.send_message("What is ownership?");
    let screen = draw(&app);
    assert!(screen.contains("What is ownership?"));
    assert!(screen.contains(ui::chat::TYPING));
    assert!(screen.contains("waiting for reply"));
}

#[test]
fn loading_state_while_history_is_fetched() {
    let mut app = App::default();
    app.select_session("s1");
    assert!(draw(&app).contains(ui::chat::LOADING));
}

#[test]
fn alert_is_drawn_over_everything() {
    let mut app = App::default();
    let effects = app.send_message("hi");
    let ticket = match effects.as_slice() {
        [Effect::SendMessage(req)] => req.ticket.clone(),
        other => panic!("unexpected {other:?}"),
    };
    app.apply(AppEvent::MessageSent {
        ticket,
        result: Err::<ChatResponse, _>(ApiError::new(ApiOperation::SendMessage, "down")),
    });
    let screen = draw(&app);
    assert!(screen.contains("Failed to send message"));
    assert!(screen.contains("Press any key"));
}

#[test]
fn long_history_opens_at_the_newest_message() {
    let app = long_conversation(40);
    let screen = draw(&app);
    assert!(screen.contains("line 39"));
    assert!(!screen.contains("line 00"));
}

#[test]
fn new_content_scrolls_back_to_the_bottom() {
    let mut app = long_conversation(40);
    let ticket = match app.send_message("latest question").as_slice() {
        [Effect::SendMessage(req)] => req.ticket.clone(),
        other => panic!("unexpected {other:?}"),
    };
    let screen = draw(&app);
    assert!(screen.contains("latest question"));
    assert!(screen.contains(ui::chat::TYPING));

    app.handle_key(KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE));
    let screen = draw(&app);
    assert!(!screen.contains(ui::chat::TYPING));
    assert!(!screen.contains("latest question"));

    app.apply(AppEvent::MessageSent {
        ticket,
        result: Ok(ChatResponse {
            session_id: "s1".into(),
            user_message: message("u1", MessageRole::User, "latest question"),
            assistant_message: message("a1", MessageRole::Assistant, "newest answer"),
        }),
    });
    let screen = draw(&app);
    assert!(screen.contains("latest question"));
    assert!(screen.contains("newest answer"));
}

#[test]
fn wide_characters_are_wrapped_not_clipped() {
    let mut app = long_conversation(0);
    let reply = "你好世界".repeat(12);
    let ticket = match app.send_message("hi").as_slice() {
        [Effect::SendMessage(req)] => req.ticket.clone(),
        other => panic!("unexpected {other:?}"),
    };
    app.apply(AppEvent::MessageSent {
        ticket,
        result: Ok(ChatResponse {
            session_id: "s1".into(),
            user_message: message("u1", MessageRole::User, "hi"),
            assistant_message: message("a1", MessageRole::Assistant, &reply),
        }),
    });
    let screen = draw(&app);
    // 96 columns of text in a narrower pane: every character still appears.
    let shown = screen.chars().filter(|c| "你好世界".contains(*c)).count();
    assert_eq!(shown, reply.chars().count());
}
