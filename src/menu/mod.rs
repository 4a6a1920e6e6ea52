//! Menu Manager
//!
//! Frame-navigation state machine behind one interactive message. The menu owns a
//! non-empty stack of frames; each position carries the frame, its action table and
//! its display context. Activation ids are classified against the injected paging
//! overlay first and the top frame's table second, and transitions push, pop or
//! truncate the stack before re-rendering the anchor message.
//!
//! Paging is orthogonal to frame navigation: turning a page never changes the stack
//! depth.

pub mod actions;
pub mod context;
pub mod registry;

pub use actions::FrameActions;
pub use context::{compose_paged_view, ActiveContext, FrameEntry};
pub use registry::PagerRegistry;

use crate::action_id::{ActionId, ActionKind, IdClassifier, PagingOverlay};
use crate::collector::CollectorHandle;
use crate::config::MenuSettings;
use crate::error::MenuError;
use crate::frame::Frame;
use crate::pager::{PageContents, Paginator};
use crate::render::{delete_best_effort, MessageRef, MessageTransport, SendTarget};
use std::sync::Arc;
use tracing::{debug, info};

/// Pager id used when the caller does not name one
pub const DEFAULT_PAGER_ID: &str = "0";

/// Creation options
#[derive(Debug, Clone)]
pub struct MenuOptions {
    /// Root frame
    pub frame: Frame,
    /// Ids never classified as navigation
    pub ignore_actions: Vec<String>,
    /// Id given to page containers spawned without one
    pub default_pager_id: String,
}

impl MenuOptions {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            ignore_actions: Vec::new(),
            default_pager_id: DEFAULT_PAGER_ID.to_string(),
        }
    }

    pub fn from_settings(frame: Frame, settings: &MenuSettings) -> Self {
        Self {
            frame,
            ignore_actions: settings.ignore_actions.clone(),
            default_pager_id: settings.default_pager_id.clone(),
        }
    }

    pub fn with_default_pager_id(mut self, id: impl Into<String>) -> Self {
        self.default_pager_id = id.into();
        self
    }

    pub fn with_ignored<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_actions.extend(ids.into_iter().map(Into::into));
        self
    }
}

/// Options for [`MenuManager::frame_forward`]
#[derive(Debug, Clone, Default)]
pub struct ForwardOptions {
    /// Graft this registered pager onto the new frame
    pub use_pager: Option<String>,
}

impl ForwardOptions {
    pub fn with_pager(pager_id: impl Into<String>) -> Self {
        Self {
            use_pager: Some(pager_id.into()),
        }
    }
}

/// Outcome of [`MenuManager::handle_activation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// A pager turned to `page`
    Paged { pager_id: String, page: usize },
    /// The stack popped (or stayed at the root)
    Back { position: usize },
    /// The menu was destroyed
    Closed,
    /// Forward action; the caller decides which frame comes next
    Forward(String),
    /// Reserved or unknown id
    Ignored,
}

/// Frame-stack menu bound to one anchor message
pub struct MenuManager {
    transport: Arc<dyn MessageTransport>,
    anchor: Option<MessageRef>,
    root: FrameEntry,
    above: Vec<FrameEntry>,
    pagers: PagerRegistry,
    classifier: IdClassifier,
    default_pager_id: String,
    collectors: Vec<CollectorHandle>,
    destroyed: bool,
}

impl MenuManager {
    /// Build a menu holding only its root frame. Nothing is sent yet.
    pub fn new(transport: Arc<dyn MessageTransport>, options: MenuOptions) -> Self {
        let classifier = IdClassifier::new(options.ignore_actions);
        let actions = FrameActions::from_rows(&options.frame.rows, &classifier);
        Self {
            transport,
            anchor: None,
            root: FrameEntry {
                frame: options.frame,
                actions,
                context: ActiveContext::Display,
            },
            above: Vec::new(),
            pagers: PagerRegistry::new(),
            classifier,
            default_pager_id: options.default_pager_id,
            collectors: Vec::new(),
            destroyed: false,
        }
    }

    /// Build a menu and publish its root frame
    pub async fn create(
        transport: Arc<dyn MessageTransport>,
        target: &SendTarget,
        options: MenuOptions,
    ) -> Result<Self, MenuError> {
        let mut menu = Self::new(transport, options);
        menu.send(target).await?;
        Ok(menu)
    }

    /// Publish the current view as a new message and anchor the menu to it
    pub async fn send(&mut self, target: &SendTarget) -> Result<&MessageRef, MenuError> {
        let view = self.current_view()?;
        let message = self.transport.send(target, &view).await?;
        info!(
            message_id = %message.message_id,
            channel_id = %message.channel_id,
            "Menu created"
        );
        self.destroyed = false;
        Ok(self.anchor.insert(message))
    }

    /// Stack depth; the root counts as 1
    pub fn position(&self) -> usize {
        self.above.len() + 1
    }

    fn top(&self) -> &FrameEntry {
        self.above.last().unwrap_or(&self.root)
    }

    pub fn current_frame(&self) -> &Frame {
        &self.top().frame
    }

    pub fn context(&self) -> &ActiveContext {
        &self.top().context
    }

    pub fn actions(&self) -> &FrameActions {
        &self.top().actions
    }

    pub fn anchor(&self) -> Option<&MessageRef> {
        self.anchor.as_ref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn classifier(&self) -> &IdClassifier {
        &self.classifier
    }

    pub fn pager(&self, id: &str) -> Option<&Paginator> {
        self.pagers.get(id)
    }

    pub fn pager_mut(&mut self, id: &str) -> Option<&mut Paginator> {
        self.pagers.get_mut(id)
    }

    pub fn pagers(&self) -> &PagerRegistry {
        &self.pagers
    }

    /// Pager whose page is the active page view
    pub fn active_pager_id(&self) -> Option<&str> {
        self.classifier.active_pager_id()
    }

    /// Stop `handle` when the menu is destroyed
    pub fn attach_collector(&mut self, handle: CollectorHandle) {
        self.collectors.push(handle);
    }

    /// Classify an activation id: paging ids first, then the top frame's table
    pub fn analyze_action(&self, id: &str) -> ActionKind {
        if self.classifier.is_pagination(id) {
            return ActionKind::Pagination;
        }
        self.top().actions.resolve(id).unwrap_or(ActionKind::Unknown)
    }

    /// The view the anchor should show for the top position
    pub fn current_view(&self) -> Result<Frame, MenuError> {
        match self.top().context {
            ActiveContext::Display => Ok(self.top().frame.clone()),
            ActiveContext::Paged { .. } => self.paged_view(),
        }
    }

    /// The top frame overlaid with the active pager's current page
    pub fn paged_view(&self) -> Result<Frame, MenuError> {
        let pager_id = self.classifier.active_pager_id().ok_or(MenuError::NoPagers)?;
        let pager = self.pagers.get_or_error(pager_id)?;
        Ok(compose_paged_view(&self.top().frame, pager.page()))
    }

    async fn render(&self, paging: bool) -> Result<(), MenuError> {
        let anchor = self.anchor.as_ref().ok_or(MenuError::NoAnchor)?;
        let view = if paging {
            self.paged_view()?
        } else {
            self.top().frame.clone()
        };
        self.transport.edit(anchor, &view).await?;
        Ok(())
    }

    fn inject_pager(&mut self, pager_id: &str) -> Result<(), MenuError> {
        let pager = self.pagers.get_or_error(pager_id)?;
        self.classifier
            .inject(PagingOverlay::new(pager_id, pager.base_row_ids()));
        debug!(pager_id = %pager_id, "Injected paging overlay");
        Ok(())
    }

    /// Re-inject the top position's pager, if it has one
    fn sync_overlay(&mut self) -> Result<bool, MenuError> {
        match self.top().context.pager_id().map(str::to_string) {
            Some(pager_id) => {
                self.inject_pager(&pager_id)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Push `frame` and render it. With `use_pager`, the pager is grafted onto
    /// the new position and the paged view is rendered.
    pub async fn frame_forward(
        &mut self,
        frame: Frame,
        options: ForwardOptions,
    ) -> Result<(), MenuError> {
        let context = match options.use_pager {
            Some(pager_id) => {
                self.pagers.get_or_error(&pager_id)?;
                ActiveContext::Paged { pager_id }
            }
            None => ActiveContext::Display,
        };

        if let ActiveContext::Paged { pager_id } = &context {
            self.inject_pager(pager_id)?;
        }

        let mut actions = FrameActions::from_rows(&frame.rows, &self.classifier);
        if let Some(pager) = context.pager_id().and_then(|id| self.pagers.get(id)) {
            actions.extend_from_rows(
                std::iter::once(pager.control_row()).chain(pager.page_rows()),
                &self.classifier,
            );
        }

        let paging = context.pager_id().is_some();
        self.above.push(FrameEntry {
            frame,
            actions,
            context,
        });
        debug!(position = self.position(), paging, "Frame forward");
        self.render(paging).await
    }

    /// Pop the top frame. The root frame is never popped.
    pub async fn frame_backward(&mut self) -> Result<(), MenuError> {
        if self.above.pop().is_none() {
            debug!("Frame backward at root ignored");
            return Ok(());
        }
        let paging = self.sync_overlay()?;
        debug!(position = self.position(), paging, "Frame backward");
        self.render(paging).await
    }

    /// Re-render the top frame, or the active page when `paging`
    pub async fn frame_refresh(&self, paging: bool) -> Result<(), MenuError> {
        if self.anchor.is_none() {
            return Err(MenuError::NoAnchor);
        }
        if paging && self.pagers.is_empty() {
            return Err(MenuError::NoPagers);
        }
        self.render(paging).await
    }

    /// Truncate the stack back to the root frame
    pub async fn frame_restart(&mut self) -> Result<(), MenuError> {
        self.above.clear();
        let paging = self.sync_overlay()?;
        debug!(paging, "Frame restart");
        self.render(paging).await
    }

    /// Turn a pager according to a `<direction>-...-<pager_id>` id and render the
    /// paged view. Returns the new page index.
    pub async fn frame_page_change(&mut self, full_id: &str) -> Result<usize, MenuError> {
        if self.pagers.is_empty() {
            return Err(MenuError::NoPagers);
        }
        let (direction, pager_id) = ActionId::parse(full_id).page_turn()?;
        let pager = self.pagers.get_mut_or_error(pager_id)?;
        pager.change_page(direction);
        let page = pager.current_page();

        if self.classifier.active_pager_id() != Some(pager_id) {
            self.inject_pager(pager_id)?;
        }
        debug!(pager_id = %pager_id, page, "Frame page change");
        self.render(true).await?;
        Ok(page)
    }

    /// Register a pager built from `contents` under `id`, or under the menu's
    /// default pager id. The first pager registered becomes the active page view.
    pub fn spawn_page_container(
        &mut self,
        contents: PageContents,
        id: Option<&str>,
    ) -> Result<(), MenuError> {
        let id = id.unwrap_or(&self.default_pager_id).to_string();
        if self.pagers.contains(&id) {
            return Err(MenuError::DuplicatePager(id));
        }
        self.register_pager(Paginator::new(id, contents)?)
    }

    /// Register a pre-built pager (custom control row)
    pub fn register_pager(&mut self, pager: Paginator) -> Result<(), MenuError> {
        let id = pager.id().to_string();
        self.pagers.register(pager)?;
        debug!(pager_id = %id, "Spawned page container");
        if self.classifier.overlay().is_none() {
            self.inject_pager(&id)?;
        }
        Ok(())
    }

    /// Stop attached collectors and delete the anchor message.
    /// Without an anchor (never sent, or already destroyed) the menu is only
    /// marked destroyed.
    pub async fn destroy(&mut self) -> Result<(), MenuError> {
        for handle in self.collectors.drain(..) {
            handle.stop();
        }
        let Some(anchor) = self.anchor.take() else {
            self.destroyed = true;
            return Ok(());
        };
        if let Err(err) = delete_best_effort(self.transport.as_ref(), &anchor).await {
            self.anchor = Some(anchor);
            return Err(err.into());
        }
        self.destroyed = true;
        info!(message_id = %anchor.message_id, "Menu destroyed");
        Ok(())
    }

    /// Apply the default reaction to one activation id
    pub async fn handle_activation(&mut self, id: &str) -> Result<Navigation, MenuError> {
        let kind = self.analyze_action(id);
        debug!(id = %id, kind = %kind, position = self.position(), "Handling activation");
        match kind {
            ActionKind::Pagination => {
                let page = self.frame_page_change(id).await?;
                Ok(Navigation::Paged {
                    pager_id: ActionId::parse(id).trailing().to_string(),
                    page,
                })
            }
            ActionKind::Back => {
                self.frame_backward().await?;
                Ok(Navigation::Back {
                    position: self.position(),
                })
            }
            ActionKind::Cancel => {
                self.destroy().await?;
                Ok(Navigation::Closed)
            }
            ActionKind::Forward => Ok(Navigation::Forward(id.to_string())),
            ActionKind::Reserved | ActionKind::Unknown => Ok(Navigation::Ignored),
        }
    }
}
