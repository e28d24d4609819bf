use std::{
    path::Path,
    time::{Duration, Instant},
};

use chrono::NaiveDate;
use crossterm::event::{self, Event};
use engine::{
    Granularity, ListSummary, SortField, Transaction, TransactionKind, TransactionQuery,
    TransactionStatus,
};

use crate::{
    auth::{AuthApi, AuthClient, AuthState},
    client::{ClientError, DashboardApi},
    config::AppConfig,
    error::{AppError, Result},
    routes::{Route, View, guard},
    session::SessionStore,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
    validation::{validate_login, validate_signup},
};

/// How long a toast stays on screen unless dismissed.
pub const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub shown_at: Instant,
}

impl ToastState {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= TOAST_TTL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Identifier,
    Password,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub identifier: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginForm {
    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Identifier => &mut self.identifier,
            LoginField::Password => &mut self.password,
        }
    }

    fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Identifier => LoginField::Password,
            LoginField::Password => LoginField::Identifier,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupField {
    #[default]
    Name,
    Email,
    Password,
    Confirm,
}

#[derive(Debug, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub focus: SignupField,
}

impl SignupForm {
    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            SignupField::Name => &mut self.name,
            SignupField::Email => &mut self.email,
            SignupField::Password => &mut self.password,
            SignupField::Confirm => &mut self.confirm,
        }
    }

    fn next_field(&mut self) {
        self.focus = match self.focus {
            SignupField::Name => SignupField::Email,
            SignupField::Email => SignupField::Password,
            SignupField::Password => SignupField::Confirm,
            SignupField::Confirm => SignupField::Name,
        };
    }
}

/// Which text input of the transactions screen is receiving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    From,
    To,
}

#[derive(Debug, Default)]
pub struct TransactionsState {
    pub query: TransactionQuery,
    pub input: InputMode,
    /// Pending text of a date input.
    pub buffer: String,
    pub selected: usize,
}

impl TransactionsState {
    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Request to run after the next frame, so the loading view is visible
/// while it is in flight.
#[derive(Debug)]
pub enum PendingRequest {
    Login {
        identifier: String,
        password: String,
    },
    Signup {
        name: String,
        email: String,
        password: String,
    },
    ChartSvg {
        granularity: Granularity,
    },
}

#[derive(Debug)]
pub struct AppState {
    pub route: Route,
    pub auth: AuthState,
    pub login: LoginForm,
    pub signup: SignupForm,
    pub transactions: Vec<Transaction>,
    pub period: Granularity,
    pub list: TransactionsState,
    pub toast: Option<ToastState>,
    pub base_url: String,
}

impl AppState {
    /// The screen actually shown, after the auth guard.
    pub fn view(&self) -> View {
        guard(self.route, &self.auth)
    }

    pub fn visible_transactions(&self) -> Vec<Transaction> {
        self.list.query.apply(&self.transactions)
    }

    pub fn list_summary(&self) -> ListSummary {
        ListSummary::new(&self.visible_transactions(), self.transactions.len())
    }
}

pub struct App<A, S> {
    config: AppConfig,
    auth: AuthClient<A, S>,
    pub state: AppState,
    pending: Option<PendingRequest>,
    should_quit: bool,
}

impl<A: AuthApi + DashboardApi, S: SessionStore> App<A, S> {
    pub fn new(config: AppConfig, auth: AuthClient<A, S>, transactions: Vec<Transaction>) -> Self {
        let state = AppState {
            route: Route::Home,
            auth: auth.state().clone(),
            login: LoginForm::default(),
            signup: SignupForm::default(),
            transactions,
            period: Granularity::default(),
            list: TransactionsState::default(),
            toast: None,
            base_url: config.base_url.clone(),
        };

        Self {
            config,
            auth,
            state,
            pending: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        // Draw the loading view once before touching the session store.
        terminal
            .draw(|frame| ui::render(frame, &self.state))
            .map_err(|err| AppError::Terminal(err.to_string()))?;
        self.restore_session();

        while !self.should_quit {
            self.expire_toast(Instant::now());
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if self.pending.is_some() {
                self.perform_pending().await;
                continue;
            }

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_action(map_key(key));
                }
            }
        }

        Ok(())
    }

    pub fn restore_session(&mut self) {
        self.auth.restore();
        self.sync_auth();
    }

    fn sync_auth(&mut self) {
        self.state.auth = self.auth.state().clone();
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self
            .state
            .toast
            .as_ref()
            .is_some_and(|toast| toast.is_expired(now))
        {
            self.state.toast = None;
        }
    }

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.state.toast = Some(ToastState::new(level, message));
    }

    pub fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.view() {
            View::Loading => {}
            View::Show(Route::Home) => self.handle_home(action),
            View::Show(Route::Login) => self.handle_login(action),
            View::Show(Route::Signup) => self.handle_signup(action),
            View::Show(Route::Dashboard) => self.handle_dashboard(action),
            View::Show(Route::Transactions) => self.handle_transactions(action),
        }
    }

    /// Keys every non-form screen shares. Returns `true` when consumed.
    fn handle_navigation(&mut self, ch: char) -> bool {
        let logged_in = matches!(self.state.auth, AuthState::LoggedIn(_));
        match ch {
            'q' => self.should_quit = true,
            'h' => self.state.route = Route::Home,
            'd' => self.state.route = Route::Dashboard,
            't' => self.state.route = Route::Transactions,
            'l' if !logged_in => self.state.route = Route::Login,
            's' if !logged_in => self.state.route = Route::Signup,
            'o' if logged_in => self.logout(),
            _ => return false,
        }
        true
    }

    fn handle_home(&mut self, action: AppAction) {
        match action {
            AppAction::Input(ch) => {
                self.handle_navigation(ch);
            }
            AppAction::Cancel => self.state.toast = None,
            _ => {}
        }
    }

    fn handle_login(&mut self, action: AppAction) {
        let form = &mut self.state.login;
        match action {
            AppAction::NextField => form.next_field(),
            AppAction::Input(ch) => form.field_mut().push(ch),
            AppAction::Backspace => {
                form.field_mut().pop();
            }
            AppAction::Cancel => self.state.route = Route::Home,
            AppAction::Submit => self.submit_login(),
            _ => {}
        }
    }

    fn handle_signup(&mut self, action: AppAction) {
        let form = &mut self.state.signup;
        match action {
            AppAction::NextField => form.next_field(),
            AppAction::Input(ch) => form.field_mut().push(ch),
            AppAction::Backspace => {
                form.field_mut().pop();
            }
            AppAction::Cancel => self.state.route = Route::Home,
            AppAction::Submit => self.submit_signup(),
            _ => {}
        }
    }

    fn handle_dashboard(&mut self, action: AppAction) {
        match action {
            AppAction::Input('p') => self.state.period = self.state.period.next(),
            AppAction::Input('g') => {
                self.pending = Some(PendingRequest::ChartSvg {
                    granularity: self.state.period,
                });
            }
            AppAction::Input(ch) => {
                self.handle_navigation(ch);
            }
            AppAction::Cancel => self.state.toast = None,
            _ => {}
        }
    }

    fn handle_transactions(&mut self, action: AppAction) {
        if self.state.list.input != InputMode::Normal {
            self.handle_list_input(action);
            return;
        }

        let len = self.state.visible_transactions().len();
        let list = &mut self.state.list;
        match action {
            AppAction::Up => list.select_prev(),
            AppAction::Down => list.select_next(len),
            AppAction::Cancel => self.state.toast = None,
            AppAction::Input('/') => list.input = InputMode::Search,
            AppAction::Input('[') => {
                list.input = InputMode::From;
                list.buffer = list.query.from.map(|d| d.to_string()).unwrap_or_default();
            }
            AppAction::Input(']') => {
                list.input = InputMode::To;
                list.buffer = list.query.to.map(|d| d.to_string()).unwrap_or_default();
            }
            AppAction::Input('f') => {
                list.query.status = next_status(list.query.status);
                list.selected = 0;
            }
            AppAction::Input('k') => {
                list.query.kind = next_kind(list.query.kind);
                list.selected = 0;
            }
            AppAction::Input(ch @ '1'..='4') => {
                let index = ch as usize - '1' as usize;
                list.query.toggle_sort(SortField::ALL[index]);
            }
            AppAction::Input('r') => {
                list.query.reset();
                list.selected = 0;
            }
            AppAction::Input('e') => self.export_visible(),
            AppAction::Input(ch) => {
                self.handle_navigation(ch);
            }
            _ => {}
        }
    }

    fn handle_list_input(&mut self, action: AppAction) {
        let list = &mut self.state.list;
        let mode = list.input;
        match (mode, action) {
            (InputMode::Search, AppAction::Input(ch)) => {
                list.query.search.push(ch);
                list.selected = 0;
            }
            (InputMode::Search, AppAction::Backspace) => {
                list.query.search.pop();
            }
            (InputMode::Search, AppAction::Submit | AppAction::Cancel) => {
                list.input = InputMode::Normal;
            }
            (InputMode::From | InputMode::To, AppAction::Input(ch)) => list.buffer.push(ch),
            (InputMode::From | InputMode::To, AppAction::Backspace) => {
                list.buffer.pop();
            }
            (InputMode::From | InputMode::To, AppAction::Cancel) => {
                list.input = InputMode::Normal;
                list.buffer.clear();
            }
            (InputMode::From | InputMode::To, AppAction::Submit) => {
                let text = std::mem::take(&mut list.buffer);
                list.input = InputMode::Normal;
                match parse_date_input(&text) {
                    Ok(date) => {
                        if mode == InputMode::From {
                            list.query.from = date;
                        } else {
                            list.query.to = date;
                        }
                        list.selected = 0;
                    }
                    Err(message) => self.toast(ToastLevel::Error, message),
                }
            }
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        let form = &self.state.login;
        let identifier = form.identifier.trim().to_string();
        if let Err(err) = validate_login(&identifier, &form.password) {
            self.toast(ToastLevel::Error, err.to_string());
            return;
        }

        self.pending = Some(PendingRequest::Login {
            identifier,
            password: form.password.clone(),
        });
        self.state.auth = AuthState::Loading;
    }

    fn submit_signup(&mut self) {
        let form = &self.state.signup;
        let name = form.name.trim().to_string();
        let email = form.email.trim().to_string();
        if let Err(err) = validate_signup(&name, &email, &form.password, &form.confirm) {
            self.toast(ToastLevel::Error, err.to_string());
            return;
        }

        self.pending = Some(PendingRequest::Signup {
            name,
            email,
            password: form.password.clone(),
        });
        self.state.auth = AuthState::Loading;
    }

    /// Runs the request queued by a form submit, if any.
    pub async fn perform_pending(&mut self) {
        let Some(request) = self.pending.take() else {
            return;
        };

        match request {
            PendingRequest::Login {
                identifier,
                password,
            } => {
                if self.auth.login(&identifier, &password).await {
                    self.state.login = LoginForm::default();
                    self.state.route = Route::Dashboard;
                    self.toast(
                        ToastLevel::Success,
                        "Login successful! Redirecting to dashboard...",
                    );
                } else {
                    self.state.login.password.clear();
                    self.toast(ToastLevel::Error, "Invalid credentials. Please try again.");
                }
            }
            PendingRequest::Signup {
                name,
                email,
                password,
            } => {
                if self.auth.signup(&name, &email, &password).await {
                    self.state.signup = SignupForm::default();
                    self.state.route = Route::Dashboard;
                    self.toast(
                        ToastLevel::Success,
                        "Account created successfully! Redirecting to dashboard...",
                    );
                } else {
                    self.toast(ToastLevel::Error, "Failed to create account. Please try again.");
                }
            }
            PendingRequest::ChartSvg { granularity } => self.save_chart(granularity).await,
        }
        self.sync_auth();
    }

    fn logout(&mut self) {
        self.auth.logout();
        self.sync_auth();
        self.state.route = Route::Home;
        self.toast(ToastLevel::Info, "Logged out successfully");
    }

    /// Downloads the server-rendered chart for `granularity` into the
    /// export directory.
    async fn save_chart(&mut self, granularity: Granularity) {
        let Some(bearer) = self.auth.bearer() else {
            self.toast(ToastLevel::Error, "Please log in first");
            return;
        };

        match self.auth.api().chart_svg(&bearer, granularity).await {
            Ok(svg) => {
                let file_name =
                    format!("finboard_chart_{}.svg", granularity.label().to_lowercase());
                let path = Path::new(&self.config.export_dir).join(file_name);
                let written = std::fs::create_dir_all(&self.config.export_dir)
                    .and_then(|()| std::fs::write(&path, svg));
                match written {
                    Ok(()) => self.toast(
                        ToastLevel::Success,
                        format!("Chart saved to {}", path.display()),
                    ),
                    Err(err) => {
                        tracing::error!("saving chart failed: {err}");
                        self.toast(ToastLevel::Error, format!("Saving chart failed: {err}"));
                    }
                }
            }
            Err(ClientError::Unauthorized) => {
                self.logout();
                self.state.route = Route::Login;
                self.toast(ToastLevel::Error, "Session expired. Please log in again.");
            }
            Err(err) => {
                tracing::warn!("chart download failed: {err}");
                self.toast(ToastLevel::Error, "Could not reach the server");
            }
        }
    }

    fn export_visible(&mut self) {
        let rows = self.state.visible_transactions();
        let today = chrono::Local::now().date_naive();
        match write_export(Path::new(&self.config.export_dir), today, &rows) {
            Ok(path) => {
                tracing::info!(rows = rows.len(), path = %path, "csv exported");
                self.toast(
                    ToastLevel::Success,
                    format!("Successfully exported {} transactions to CSV!", rows.len()),
                );
            }
            Err(err) => {
                tracing::error!("csv export failed: {err}");
                self.toast(ToastLevel::Error, format!("Export failed: {err}"));
            }
        }
    }
}

/// Writes `rows` under `dir` and returns the file path.
fn write_export(dir: &Path, today: NaiveDate, rows: &[Transaction]) -> Result<String> {
    let bytes = engine::export_csv(rows)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(engine::export_file_name(today));
    std::fs::write(&path, bytes)?;
    Ok(path.display().to_string())
}

/// Empty input clears the bound.
fn parse_date_input(text: &str) -> std::result::Result<Option<NaiveDate>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("Invalid date \"{text}\", expected YYYY-MM-DD"))
}

fn next_status(status: Option<TransactionStatus>) -> Option<TransactionStatus> {
    match status {
        None => Some(TransactionStatus::Completed),
        Some(TransactionStatus::Completed) => Some(TransactionStatus::Pending),
        Some(TransactionStatus::Pending) => Some(TransactionStatus::Failed),
        Some(TransactionStatus::Failed) => None,
    }
}

fn next_kind(kind: Option<TransactionKind>) -> Option<TransactionKind> {
    match kind {
        None => Some(TransactionKind::Income),
        Some(TransactionKind::Income) => Some(TransactionKind::Expense),
        Some(TransactionKind::Expense) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    /// `{"userId":"u-7"}`
    const TOKEN: &str = "e30.eyJ1c2VySWQiOiJ1LTcifQ.sig";

    struct StubApi {
        accept: bool,
        /// Whether protected calls accept the token.
        token_valid: bool,
    }

    impl DashboardApi for StubApi {
        async fn chart_svg(
            &self,
            bearer: &str,
            granularity: Granularity,
        ) -> std::result::Result<String, ClientError> {
            if self.token_valid && bearer == format!("Bearer {TOKEN}") {
                Ok(format!("<svg>{}</svg>", granularity.label()))
            } else {
                Err(ClientError::Unauthorized)
            }
        }
    }

    impl AuthApi for StubApi {
        async fn login(&self, _: &str, _: &str) -> std::result::Result<String, ClientError> {
            self.reply()
        }

        async fn register(
            &self,
            _: &str,
            _: &str,
            _: &str,
        ) -> std::result::Result<String, ClientError> {
            self.reply()
        }
    }

    impl StubApi {
        fn reply(&self) -> std::result::Result<String, ClientError> {
            if self.accept {
                Ok(TOKEN.to_string())
            } else {
                Err(ClientError::Unauthorized)
            }
        }
    }

    fn app(accept: bool, export_dir: &str) -> App<StubApi, MemorySessionStore> {
        app_with(
            StubApi {
                accept,
                token_valid: accept,
            },
            export_dir,
        )
    }

    fn app_with(api: StubApi, export_dir: &str) -> App<StubApi, MemorySessionStore> {
        let config = AppConfig {
            export_dir: export_dir.to_string(),
            ..AppConfig::default()
        };
        let auth = AuthClient::new(api, MemorySessionStore::default());
        let transactions = engine::bundled_transactions().unwrap();
        let mut app = App::new(config, auth, transactions);
        app.restore_session();
        app
    }

    fn type_text(app: &mut App<StubApi, MemorySessionStore>, text: &str) {
        for ch in text.chars() {
            app.handle_action(AppAction::Input(ch));
        }
    }

    #[test]
    fn toast_expires_after_five_seconds() {
        let toast = ToastState::new(ToastLevel::Info, "hi");
        assert!(!toast.is_expired(toast.shown_at + Duration::from_secs(4)));
        assert!(toast.is_expired(toast.shown_at + TOAST_TTL));
    }

    #[test]
    fn protected_routes_redirect_to_login_when_logged_out() {
        let mut app = app(true, ".");
        app.handle_action(AppAction::Input('d'));
        assert_eq!(app.state.route, Route::Dashboard);
        assert_eq!(app.state.view(), View::Show(Route::Login));
    }

    #[tokio::test]
    async fn invalid_forms_never_reach_the_api() {
        let mut app = app(true, ".");
        app.state.route = Route::Signup;
        type_text(&mut app, "Alice");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "alice@example.com");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "abc");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "abc");
        app.handle_action(AppAction::Submit);
        assert!(app.pending.is_none());
        app.perform_pending().await;

        let toast = app.state.toast.as_ref().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.message, "Password must be at least 6 characters long");
    }

    #[tokio::test]
    async fn successful_login_lands_on_dashboard() {
        let mut app = app(true, ".");
        app.state.route = Route::Login;
        type_text(&mut app, "alice@example.com");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "secret1");
        app.handle_action(AppAction::Submit);

        // The request waits for the next frame; meanwhile the guard shows loading.
        assert_eq!(app.state.view(), View::Loading);
        app.perform_pending().await;

        assert_eq!(app.state.view(), View::Show(Route::Dashboard));
        assert!(app.state.login.password.is_empty());
        assert_eq!(app.state.toast.as_ref().unwrap().level, ToastLevel::Success);

        // Login is skipped once authenticated.
        app.state.route = Route::Login;
        assert_eq!(app.state.view(), View::Show(Route::Dashboard));
    }

    #[tokio::test]
    async fn rejected_login_stays_on_login() {
        let mut app = app(false, ".");
        app.state.route = Route::Login;
        type_text(&mut app, "alice");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "wrong");
        app.handle_action(AppAction::Submit);
        app.perform_pending().await;

        assert_eq!(app.state.view(), View::Show(Route::Login));
        assert_eq!(
            app.state.toast.as_ref().unwrap().message,
            "Invalid credentials. Please try again."
        );
    }

    #[tokio::test]
    async fn logout_returns_home() {
        let mut app = app(true, ".");
        app.state.route = Route::Login;
        type_text(&mut app, "alice");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "secret1");
        app.handle_action(AppAction::Submit);
        app.perform_pending().await;

        app.handle_action(AppAction::Input('o'));
        assert_eq!(app.state.auth, AuthState::LoggedOut);
        assert_eq!(app.state.view(), View::Show(Route::Home));
    }

    #[tokio::test]
    async fn transactions_filters_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(true, &dir.path().display().to_string());
        app.state.route = Route::Login;
        type_text(&mut app, "alice");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "secret1");
        app.handle_action(AppAction::Submit);
        app.perform_pending().await;
        app.handle_action(AppAction::Input('t'));
        assert_eq!(app.state.view(), View::Show(Route::Transactions));

        // Only income.
        app.handle_action(AppAction::Input('k'));
        let visible = app.state.visible_transactions();
        assert!(!visible.is_empty());
        assert!(visible.iter().all(|tx| tx.kind == TransactionKind::Income));

        // Date range through the inputs.
        app.handle_action(AppAction::Input('['));
        type_text(&mut app, "2024-01-01");
        app.handle_action(AppAction::Submit);
        assert_eq!(app.state.list.query.from, NaiveDate::from_ymd_opt(2024, 1, 1));

        app.handle_action(AppAction::Input(']'));
        type_text(&mut app, "garbage");
        app.handle_action(AppAction::Submit);
        assert_eq!(app.state.list.query.to, None);
        assert_eq!(app.state.toast.as_ref().unwrap().level, ToastLevel::Error);

        let expected = app.state.visible_transactions().len();
        app.handle_action(AppAction::Input('e'));
        assert_eq!(
            app.state.toast.as_ref().unwrap().message,
            format!("Successfully exported {expected} transactions to CSV!")
        );
        let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);

        app.handle_action(AppAction::Input('r'));
        assert_eq!(app.state.list.query, TransactionQuery::default());
    }

    #[tokio::test]
    async fn dashboard_cycles_periods() {
        let mut app = app(true, ".");
        app.state.route = Route::Login;
        type_text(&mut app, "alice");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "secret1");
        app.handle_action(AppAction::Submit);
        app.perform_pending().await;

        assert_eq!(app.state.period, Granularity::Monthly);
        app.handle_action(AppAction::Input('p'));
        assert_eq!(app.state.period, Granularity::Quarterly);
        app.handle_action(AppAction::Input('p'));
        app.handle_action(AppAction::Input('p'));
        assert_eq!(app.state.period, Granularity::Monthly);
    }

    #[test]
    fn date_inputs() {
        assert_eq!(parse_date_input(""), Ok(None));
        assert_eq!(
            parse_date_input(" 2024-02-29 "),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29))
        );
        assert!(parse_date_input("2024-02-30").is_err());
    }

    #[tokio::test]
    async fn dashboard_saves_the_server_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(true, &dir.path().display().to_string());
        app.state.route = Route::Login;
        type_text(&mut app, "alice");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "secret1");
        app.handle_action(AppAction::Submit);
        app.perform_pending().await;

        app.handle_action(AppAction::Input('p'));
        app.handle_action(AppAction::Input('g'));
        app.perform_pending().await;

        let saved =
            std::fs::read_to_string(dir.path().join("finboard_chart_quarterly.svg")).unwrap();
        assert_eq!(saved, "<svg>Quarterly</svg>");
        assert_eq!(app.state.toast.as_ref().unwrap().level, ToastLevel::Success);
    }

    #[tokio::test]
    async fn rejected_bearer_logs_out() {
        let mut app = app_with(
            StubApi {
                accept: true,
                token_valid: false,
            },
            ".",
        );
        app.state.route = Route::Login;
        type_text(&mut app, "alice");
        app.handle_action(AppAction::NextField);
        type_text(&mut app, "secret1");
        app.handle_action(AppAction::Submit);
        app.perform_pending().await;

        app.handle_action(AppAction::Input('g'));
        app.perform_pending().await;

        assert_eq!(app.state.auth, AuthState::LoggedOut);
        assert_eq!(app.state.view(), View::Show(Route::Login));
        assert_eq!(
            app.state.toast.as_ref().unwrap().message,
            "Session expired. Please log in again."
        );
    }
}
