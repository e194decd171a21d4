//! Test helpers
//!
//! Mock collaborators and factory functions for service tests.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::config::PortalConfig;
use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{
    BrowserHost, CredentialStore, NativeConfirm, ProgressSink, PromptSurface, ShellSurface,
    UpdaterBackend,
};
use crate::types::{
    Account, AccountDraft, AccountKey, AccountSummary, DownloadProgress, LayoutBox, MountRect,
    PasswordTable, UpdateInfo, UpdateState, UserMessage, View,
};

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ===== MockBrowserHost =====

/// One recorded call to the browser host
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Open(String, MountRect),
    Navigate(String),
    Hide,
    UpdateBounds(MountRect),
    UpdateLayout(f64),
    RefreshAutofill(String),
    FocusMainWindow,
}

#[derive(Default)]
pub struct MockBrowserHost {
    calls: Mutex<Vec<HostCall>>,
    /// If Some, every call is recorded and then fails with this message
    error: Mutex<Option<String>>,
}

impl MockBrowserHost {
    pub fn calls(&self) -> Vec<HostCall> {
        lock(&self.calls).clone()
    }

    pub fn clear(&self) {
        lock(&self.calls).clear();
    }

    pub fn fail_with(&self, msg: &str) {
        *lock(&self.error) = Some(msg.to_string());
    }

    fn record(&self, call: HostCall) -> CoreResult<()> {
        lock(&self.calls).push(call);
        match lock(&self.error).as_ref() {
            Some(msg) => Err(CoreError::HostCommunication(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BrowserHost for MockBrowserHost {
    async fn open(&self, url: &str, rect: MountRect) -> CoreResult<()> {
        self.record(HostCall::Open(url.to_string(), rect))
    }

    async fn navigate(&self, url: &str) -> CoreResult<()> {
        self.record(HostCall::Navigate(url.to_string()))
    }

    async fn hide(&self) -> CoreResult<()> {
        self.record(HostCall::Hide)
    }

    async fn update_bounds(&self, rect: MountRect) -> CoreResult<()> {
        self.record(HostCall::UpdateBounds(rect))
    }

    async fn update_layout(&self, sidebar_width: f64) -> CoreResult<()> {
        self.record(HostCall::UpdateLayout(sidebar_width))
    }

    async fn refresh_autofill_data(&self, url: &str) -> CoreResult<()> {
        self.record(HostCall::RefreshAutofill(url.to_string()))
    }

    async fn focus_main_window(&self) -> CoreResult<()> {
        self.record(HostCall::FocusMainWindow)
    }
}

// ===== MockCredentialStore =====

#[derive(Default)]
pub struct MockCredentialStore {
    accounts: Mutex<HashMap<AccountKey, Account>>,
    set_calls: AtomicUsize,
    /// Fails every operation
    error: Mutex<Option<String>>,
    /// Fails writes only
    set_error: Mutex<Option<String>>,
}

impl MockCredentialStore {
    pub fn insert(&self, domain: &str, username: &str, secret: &str) {
        let account = Account {
            domain: domain.to_string(),
            username: username.to_string(),
            secret: secret.to_string(),
            metadata: BTreeMap::new(),
        };
        lock(&self.accounts).insert(account.key(), account);
    }

    pub fn secret_of(&self, domain: &str, username: &str) -> Option<String> {
        lock(&self.accounts)
            .get(&AccountKey::new(domain, username))
            .map(|a| a.secret.clone())
    }

    pub fn len(&self) -> usize {
        lock(&self.accounts).len()
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn fail_with(&self, msg: &str) {
        *lock(&self.error) = Some(msg.to_string());
    }

    pub fn fail_sets_with(&self, msg: &str) {
        *lock(&self.set_error) = Some(msg.to_string());
    }

    fn check(&self) -> CoreResult<()> {
        match lock(&self.error).as_ref() {
            Some(msg) => Err(CoreError::StorageError(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn list(&self) -> CoreResult<Vec<AccountSummary>> {
        self.check()?;
        Ok(lock(&self.accounts).values().map(Account::summary).collect())
    }

    async fn get(&self, key: &AccountKey) -> CoreResult<Option<Account>> {
        self.check()?;
        Ok(lock(&self.accounts).get(key).cloned())
    }

    async fn set(&self, account: &Account) -> CoreResult<()> {
        self.check()?;
        if let Some(msg) = lock(&self.set_error).as_ref() {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.accounts).insert(account.key(), account.clone());
        Ok(())
    }

    async fn remove(&self, key: &AccountKey) -> CoreResult<bool> {
        self.check()?;
        Ok(lock(&self.accounts).remove(key).is_some())
    }
}

// ===== MockShellSurface =====

#[derive(Default)]
pub struct MockShellSurface {
    visible: Mutex<HashMap<View, bool>>,
    layouts: Mutex<HashMap<String, LayoutBox>>,
    titles: Mutex<Vec<String>>,
    collapsed: Mutex<Option<bool>>,
    submenus: Mutex<HashMap<String, bool>>,
    tables: Mutex<Vec<PasswordTable>>,
    editor: Mutex<Option<AccountDraft>>,
    update_states: Mutex<Vec<UpdateState>>,
    messages: Mutex<Vec<UserMessage>>,
    clipboard: Mutex<Option<String>>,
}

impl MockShellSurface {
    pub fn set_layout(&self, element_id: &str, layout: Option<LayoutBox>) {
        let mut layouts = lock(&self.layouts);
        match layout {
            Some(b) => layouts.insert(element_id.to_string(), b),
            None => layouts.remove(element_id),
        };
    }

    /// Views whose container is currently shown
    pub fn visible_views(&self) -> Vec<View> {
        View::ALL
            .into_iter()
            .filter(|v| lock(&self.visible).get(v).copied().unwrap_or(false))
            .collect()
    }

    pub fn titles(&self) -> Vec<String> {
        lock(&self.titles).clone()
    }

    pub fn sidebar_collapsed(&self) -> Option<bool> {
        *lock(&self.collapsed)
    }

    pub fn submenu_open(&self, menu_id: &str) -> Option<bool> {
        lock(&self.submenus).get(menu_id).copied()
    }

    pub fn tables(&self) -> Vec<PasswordTable> {
        lock(&self.tables).clone()
    }

    pub fn editor(&self) -> Option<AccountDraft> {
        lock(&self.editor).clone()
    }

    pub fn update_states(&self) -> Vec<UpdateState> {
        lock(&self.update_states).clone()
    }

    pub fn messages(&self) -> Vec<UserMessage> {
        lock(&self.messages).clone()
    }

    pub fn clipboard(&self) -> Option<String> {
        lock(&self.clipboard).clone()
    }
}

impl ShellSurface for MockShellSurface {
    fn set_view_visible(&self, view: View, visible: bool) {
        lock(&self.visible).insert(view, visible);
    }

    fn layout_of(&self, element_id: &str) -> Option<LayoutBox> {
        lock(&self.layouts).get(element_id).copied()
    }

    fn set_title(&self, title: &str) {
        lock(&self.titles).push(title.to_string());
    }

    fn set_sidebar_collapsed(&self, collapsed: bool) {
        *lock(&self.collapsed) = Some(collapsed);
    }

    fn set_submenu_open(&self, menu_id: &str, open: bool) {
        lock(&self.submenus).insert(menu_id.to_string(), open);
    }

    fn render_password_table(&self, table: &PasswordTable) {
        lock(&self.tables).push(table.clone());
    }

    fn open_account_editor(&self, draft: &AccountDraft) {
        *lock(&self.editor) = Some(draft.clone());
    }

    fn close_account_editor(&self) {
        *lock(&self.editor) = None;
    }

    fn render_update_state(&self, state: &UpdateState) {
        lock(&self.update_states).push(state.clone());
    }

    fn show_message(&self, message: &UserMessage) {
        lock(&self.messages).push(message.clone());
    }

    fn copy_to_clipboard(&self, text: &str) -> CoreResult<()> {
        *lock(&self.clipboard) = Some(text.to_string());
        Ok(())
    }
}

// ===== Dialog mocks =====

/// In-app prompt answering from a scripted list; answers `false` once exhausted
pub struct MockPromptSurface {
    answers: Mutex<VecDeque<bool>>,
    presented: Mutex<Vec<String>>,
    mounted: AtomicBool,
    in_flight: AtomicUsize,
    max_concurrent: AtomicUsize,
}

impl MockPromptSurface {
    pub fn with_answers(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            presented: Mutex::new(Vec::new()),
            mounted: AtomicBool::new(true),
            in_flight: AtomicUsize::new(0),
            max_concurrent: AtomicUsize::new(0),
        }
    }

    pub fn set_mounted(&self, mounted: bool) {
        self.mounted.store(mounted, Ordering::SeqCst);
    }

    pub fn presented(&self) -> Vec<String> {
        lock(&self.presented).clone()
    }

    /// Highest number of prompts that were open at the same time
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PromptSurface for MockPromptSurface {
    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    async fn present(&self, message: &str) -> CoreResult<bool> {
        let open = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_concurrent.fetch_max(open, Ordering::SeqCst);
        lock(&self.presented).push(message.to_string());

        // give other waiters a chance to overlap
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        let answer = lock(&self.answers).pop_front().unwrap_or(false);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(answer)
    }
}

pub struct MockNativeConfirm {
    answer: bool,
    asked: Mutex<Vec<String>>,
}

impl MockNativeConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        lock(&self.asked).clone()
    }
}

impl NativeConfirm for MockNativeConfirm {
    fn confirm(&self, message: &str) -> bool {
        lock(&self.asked).push(message.to_string());
        self.answer
    }
}

// ===== MockUpdater =====

/// Stage at which [`MockUpdater`] fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdaterStage {
    Check,
    Download,
    Install,
}

pub struct MockUpdater {
    update: Mutex<Option<UpdateInfo>>,
    progress: Mutex<Vec<DownloadProgress>>,
    fail_at: Mutex<Option<UpdaterStage>>,
    /// When set, `check` waits for a notification before answering
    gate: Mutex<Option<Arc<Notify>>>,
    checks: AtomicUsize,
    installed: Mutex<Vec<String>>,
    relaunched: AtomicBool,
}

impl MockUpdater {
    pub fn new(update: Option<UpdateInfo>) -> Self {
        Self {
            update: Mutex::new(update),
            progress: Mutex::new(Vec::new()),
            fail_at: Mutex::new(None),
            gate: Mutex::new(None),
            checks: AtomicUsize::new(0),
            installed: Mutex::new(Vec::new()),
            relaunched: AtomicBool::new(false),
        }
    }

    pub fn set_progress(&self, events: impl IntoIterator<Item = DownloadProgress>) {
        *lock(&self.progress) = events.into_iter().collect();
    }

    pub fn fail_at(&self, stage: Option<UpdaterStage>) {
        *lock(&self.fail_at) = stage;
    }

    pub fn hold_check(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *lock(&self.gate) = Some(Arc::clone(&gate));
        gate
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    pub fn installed(&self) -> Vec<String> {
        lock(&self.installed).clone()
    }

    pub fn relaunched(&self) -> bool {
        self.relaunched.load(Ordering::SeqCst)
    }

    fn fails_at(&self, stage: UpdaterStage) -> CoreResult<()> {
        if *lock(&self.fail_at) == Some(stage) {
            return Err(CoreError::UpdateError(format!("{stage:?} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl UpdaterBackend for MockUpdater {
    async fn check(&self) -> CoreResult<Option<UpdateInfo>> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        let gate = lock(&self.gate).clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.fails_at(UpdaterStage::Check)?;
        Ok(lock(&self.update).clone())
    }

    async fn download(
        &self,
        _update: &UpdateInfo,
        on_progress: ProgressSink<'_>,
    ) -> CoreResult<()> {
        let events = lock(&self.progress).clone();
        for event in events {
            on_progress(event);
        }
        self.fails_at(UpdaterStage::Download)
    }

    async fn install(&self, update: &UpdateInfo) -> CoreResult<()> {
        self.fails_at(UpdaterStage::Install)?;
        lock(&self.installed).push(update.version.clone());
        Ok(())
    }

    async fn relaunch(&self) -> CoreResult<()> {
        self.relaunched.store(true, Ordering::SeqCst);
        Ok(())
    }
}

// ===== Factory functions =====

pub struct TestMocks {
    pub host: Arc<MockBrowserHost>,
    pub store: Arc<MockCredentialStore>,
    pub shell: Arc<MockShellSurface>,
}

/// Create a `ServiceContext` with default config and fresh mocks
pub fn create_test_context() -> (Arc<ServiceContext>, TestMocks) {
    create_test_context_with_config(PortalConfig::default())
}

pub fn create_test_context_with_config(config: PortalConfig) -> (Arc<ServiceContext>, TestMocks) {
    let host = Arc::new(MockBrowserHost::default());
    let store = Arc::new(MockCredentialStore::default());
    let shell = Arc::new(MockShellSurface::default());

    let ctx = Arc::new(ServiceContext::new(
        host.clone(),
        store.clone(),
        shell.clone(),
        Arc::new(config),
    ));

    (ctx, TestMocks { host, store, shell })
}
