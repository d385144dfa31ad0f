use ratatui::layout::Rect;
use tokio::task::JoinHandle;
use tigrinja_core::{
    default_bindings, dispatch, render_bindings, Binding, ChatSession, Completion, Config,
    LabelSet, Submission,
};

pub struct App {
    pub should_quit: bool,
    pub session: ChatSession,

    // Localized chrome, re-rendered on every UI language change
    pub labels: LabelSet,
    bindings: Vec<Binding>,

    // Input cursor, in characters
    pub cursor: usize,

    // Requests in flight, drained as they finish
    tasks: Vec<JoinHandle<Completion>>,

    // Chat pane geometry from the last draw (inner size, for scroll math and mouse hits)
    pub chat_area: Option<Rect>,

    pub animation_frame: u8,
    pub status: Option<String>,
    pub persist_reply_language: bool,
}

impl App {
    pub fn new(session: ChatSession) -> Self {
        let bindings = default_bindings();
        let mut labels = LabelSet::new();
        render_bindings(session.ui_language(), &bindings, &mut labels);

        Self {
            should_quit: false,
            session,
            labels,
            bindings,
            cursor: 0,
            tasks: Vec::new(),
            chat_area: None,
            animation_frame: 0,
            status: None,
            persist_reply_language: true,
        }
    }

    fn relocalize(&mut self) {
        render_bindings(self.session.ui_language(), &self.bindings, &mut self.labels);
    }

    pub fn cycle_ui_language(&mut self) {
        let next = self.session.ui_language().next();
        if let Err(e) = self.session.set_ui_language(next) {
            tracing::warn!("Could not save UI language: {}", e);
            self.status = Some(format!("Could not save UI language: {}", e));
        }
        self.relocalize();
    }

    pub fn cycle_reply_language(&mut self) {
        let next = self.session.reply_language().next();
        self.session.set_reply_language(next);
        if self.persist_reply_language {
            if let Err(e) = Config::save_reply_language(next) {
                tracing::warn!("Could not save reply language: {}", e);
                self.status = Some(format!("Could not save reply language: {}", e));
            }
        }
    }

    pub fn submit_send(&mut self) {
        let submission = self.session.begin_send();
        if matches!(submission, Submission::Dispatched(_)) {
            self.cursor = 0;
        }
        self.spawn(submission);
    }

    pub fn submit_translate(&mut self) {
        let submission = self.session.begin_translate();
        self.cursor = self.cursor.min(self.session.input.chars().count());
        self.spawn(submission);
    }

    fn spawn(&mut self, submission: Submission) {
        if let Submission::Dispatched(request) = submission {
            let client = self.session.client().clone();
            self.tasks
                .push(tokio::spawn(async move { dispatch(&client, request).await }));
        }
    }

    pub fn is_busy(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Apply every finished request to the session.
    pub async fn poll_tasks(&mut self) {
        let mut i = 0;
        while i < self.tasks.len() {
            if !self.tasks[i].is_finished() {
                i += 1;
                continue;
            }

            let task = self.tasks.remove(i);
            match task.await {
                Ok(completion) => {
                    self.session.complete(completion);
                }
                Err(e) => {
                    tracing::error!("Request task failed: {}", e);
                    self.session.abandon();
                }
            }
        }
    }

    pub fn tick_animation(&mut self) {
        if self.session.transcript.has_thinking() {
            self.animation_frame = (self.animation_frame + 1) % 4;
        }
    }

    /// Scroll one message towards the start of the transcript.
    pub fn scroll_up(&mut self) {
        let transcript = &mut self.session.transcript;
        let top = transcript.scroll_top().saturating_sub(1);
        transcript.scroll_to(top);
    }

    pub fn scroll_down(&mut self) {
        let transcript = &mut self.session.transcript;
        let top = transcript.scroll_top() + 1;
        transcript.scroll_to(top);
    }

    pub fn scroll_to_latest(&mut self) {
        self.session.transcript.scroll_to_latest();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tigrinja_core::{ApiClient, BindingTarget, NoopOpener, ReplyLanguage, UiLanguage, UiLanguageState};

    fn app() -> App {
        let session = ChatSession::new(
            ApiClient::new("http://127.0.0.1:9"),
            UiLanguageState::in_memory(UiLanguage::English),
            ReplyLanguage::English,
            Box::new(NoopOpener),
        );
        let mut app = App::new(session);
        app.persist_reply_language = false;
        app
    }

    #[test]
    fn test_labels_rendered_on_start_and_language_change() {
        let mut app = app();
        assert_eq!(app.labels.text("translate-btn"), "Translate");

        app.cycle_ui_language();
        assert_eq!(app.session.ui_language(), UiLanguage::Norwegian);
        assert_eq!(app.labels.text("translate-btn"), "Oversett");
        assert_eq!(
            app.labels.get("message-input", BindingTarget::Placeholder),
            Some("Spør meg hva som helst på hvilket som helst språk...")
        );
    }

    #[test]
    fn test_cycle_reply_language() {
        let mut app = app();
        app.cycle_reply_language();
        assert_eq!(app.session.reply_language(), ReplyLanguage::Tigrinya);
    }

    #[test]
    fn test_scroll_moves_by_message() {
        let mut app = app();
        app.session.transcript.append_user_message("a");
        app.session.transcript.append_bot_message("b");

        app.scroll_up();
        assert_eq!(app.session.transcript.scroll_top(), 1);
        app.scroll_down();
        app.scroll_down();
        assert!(app.session.transcript.is_at_latest());
    }

    #[tokio::test]
    async fn test_empty_send_spawns_nothing() {
        let mut app = app();
        app.submit_send();
        assert!(!app.is_busy());
        assert!(app.session.transcript.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_send_keeps_cursor() {
        let mut app = app();
        app.session.input = "   ".to_string();
        app.cursor = 3;
        app.submit_send();
        assert!(!app.is_busy());
        assert_eq!(app.session.input, "   ");
        assert_eq!(app.cursor, 3);
    }

    #[tokio::test]
    async fn test_failed_task_settles_request() {
        let mut app = app();
        app.session.input = "hello".to_string();
        let Submission::Dispatched(_request) = app.session.begin_send() else {
            panic!("expected dispatch");
        };
        let task: JoinHandle<Completion> = tokio::spawn(async { panic!("request task crashed") });
        app.tasks.push(task);
        while !app.tasks[0].is_finished() {
            tokio::task::yield_now().await;
        }

        app.poll_tasks().await;

        assert!(!app.is_busy());
        assert_eq!(app.session.in_flight(), 0);
        assert!(!app.session.transcript.has_thinking());
        assert_eq!(
            app.session.transcript.last_message().unwrap().raw_text,
            "Sorry, there was an error connecting to the server."
        );
    }
}
