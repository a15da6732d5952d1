// View state machine
//
// One struct owns every navigation flag the console has. The dashboard axis
// (monitor / config list / editor, with the decision detail overlaid on top)
// and the agent-center axis (list / detail / create, with its own tab) are
// independent: moving along one never touches the other.

use crate::catalog::Agent;
use crate::editor::StreamDraft;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    AgentCenter,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Dashboard => "决策驾驶舱",
            Screen::AgentCenter => "智能体中心",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Screen::Dashboard => Screen::AgentCenter,
            Screen::AgentCenter => Screen::Dashboard,
        }
    }
}

/// Background mode of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardMode {
    #[default]
    Monitor,
    Config,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigStep {
    #[default]
    List,
    Editor(StreamDraft),
}

/// What the dashboard is currently painting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    Monitor,
    ConfigList,
    ConfigEditor,
    DecisionDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentTab {
    #[default]
    Info,
    Process,
}

impl AgentTab {
    pub fn toggle(self) -> Self {
        match self {
            AgentTab::Info => AgentTab::Process,
            AgentTab::Process => AgentTab::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AgentCenterMode {
    #[default]
    List,
    Detail {
        agent: Agent,
        tab: AgentTab,
    },
    Create {
        agent: Agent,
        tab: AgentTab,
    },
}

impl AgentCenterMode {
    pub fn agent(&self) -> Option<&Agent> {
        match self {
            AgentCenterMode::List => None,
            AgentCenterMode::Detail { agent, .. } | AgentCenterMode::Create { agent, .. } => {
                Some(agent)
            }
        }
    }

    pub fn tab(&self) -> Option<AgentTab> {
        match self {
            AgentCenterMode::List => None,
            AgentCenterMode::Detail { tab, .. } | AgentCenterMode::Create { tab, .. } => Some(*tab),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewController {
    screen: Screen,
    mode: DashboardMode,
    config_step: ConfigStep,
    /// Decision detail overlay; None when no decision is open
    selected_decision: Option<String>,
    agent_center: AgentCenterMode,
}

impl ViewController {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            ..Self::default()
        }
    }

    // ─── Screen ─────────────────────────────────────────────

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    // ─── Dashboard axis ─────────────────────────────────────

    pub fn dashboard_view(&self) -> DashboardView {
        if self.selected_decision.is_some() {
            return DashboardView::DecisionDetail;
        }
        match (self.mode, &self.config_step) {
            (DashboardMode::Monitor, _) => DashboardView::Monitor,
            (DashboardMode::Config, ConfigStep::List) => DashboardView::ConfigList,
            (DashboardMode::Config, ConfigStep::Editor(_)) => DashboardView::ConfigEditor,
        }
    }

    pub fn mode(&self) -> DashboardMode {
        self.mode
    }

    /// The monitor/config toggle is only offered when nothing is layered on top
    pub fn can_toggle_mode(&self) -> bool {
        self.selected_decision.is_none() && self.config_step == ConfigStep::List
    }

    pub fn set_mode(&mut self, mode: DashboardMode) -> bool {
        if !self.can_toggle_mode() {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn toggle_mode(&mut self) -> bool {
        let next = match self.mode {
            DashboardMode::Monitor => DashboardMode::Config,
            DashboardMode::Config => DashboardMode::Monitor,
        };
        self.set_mode(next)
    }

    /// Open a stream in the editor (ConfigList -> ConfigEditor)
    pub fn open_editor(&mut self, draft: StreamDraft) -> bool {
        if self.dashboard_view() != DashboardView::ConfigList {
            return false;
        }
        self.config_step = ConfigStep::Editor(draft);
        true
    }

    /// Start a new stream draft
    pub fn create_stream(&mut self) -> bool {
        self.open_editor(StreamDraft::blank())
    }

    pub fn close_editor(&mut self) {
        self.config_step = ConfigStep::List;
    }

    pub fn draft(&self) -> Option<&StreamDraft> {
        match &self.config_step {
            ConfigStep::Editor(draft) => Some(draft),
            ConfigStep::List => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut StreamDraft> {
        match &mut self.config_step {
            ConfigStep::Editor(draft) => Some(draft),
            ConfigStep::List => None,
        }
    }

    pub fn selected_decision(&self) -> Option<&str> {
        self.selected_decision.as_deref()
    }

    /// Bind the detail overlay to `decision_id`.
    /// Returns true when the bound id changed.
    pub fn open_decision(&mut self, decision_id: &str) -> bool {
        if self.selected_decision.as_deref() == Some(decision_id) {
            return false;
        }
        self.selected_decision = Some(decision_id.to_string());
        true
    }

    /// Drop the overlay; the background mode shows again
    pub fn close_decision(&mut self) -> Option<String> {
        self.selected_decision.take()
    }

    // ─── Agent-center axis ──────────────────────────────────

    pub fn agent_center(&self) -> &AgentCenterMode {
        &self.agent_center
    }

    pub fn open_agent(&mut self, agent: Agent) {
        self.agent_center = AgentCenterMode::Detail {
            agent,
            tab: AgentTab::Info,
        };
    }

    pub fn create_agent(&mut self) {
        self.agent_center = AgentCenterMode::Create {
            agent: Agent::blank(),
            tab: AgentTab::Info,
        };
    }

    pub fn close_agent(&mut self) {
        self.agent_center = AgentCenterMode::List;
    }

    pub fn set_agent_tab(&mut self, new_tab: AgentTab) {
        match &mut self.agent_center {
            AgentCenterMode::List => {}
            AgentCenterMode::Detail { tab, .. } | AgentCenterMode::Create { tab, .. } => {
                *tab = new_tab;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StreamCatalog;

    #[test]
    fn test_starts_on_monitor() {
        let view = ViewController::default();
        assert_eq!(view.screen(), Screen::Dashboard);
        assert_eq!(view.dashboard_view(), DashboardView::Monitor);
        assert!(view.can_toggle_mode());
    }

    #[test]
    fn test_toggle_between_monitor_and_config() {
        let mut view = ViewController::default();
        assert!(view.toggle_mode());
        assert_eq!(view.dashboard_view(), DashboardView::ConfigList);
        assert!(view.toggle_mode());
        assert_eq!(view.dashboard_view(), DashboardView::Monitor);
    }

    #[test]
    fn test_toggle_blocked_while_decision_open() {
        let mut view = ViewController::default();
        view.open_decision("DS-04");
        assert!(!view.can_toggle_mode());
        assert!(!view.toggle_mode());
        assert_eq!(view.mode(), DashboardMode::Monitor);
    }

    #[test]
    fn test_toggle_blocked_while_editing() {
        let mut view = ViewController::default();
        view.set_mode(DashboardMode::Config);
        assert!(view.create_stream());
        assert_eq!(view.dashboard_view(), DashboardView::ConfigEditor);
        assert!(!view.toggle_mode());

        view.close_editor();
        assert_eq!(view.dashboard_view(), DashboardView::ConfigList);
        assert!(view.toggle_mode());
    }

    #[test]
    fn test_editor_opens_only_from_config_list() {
        let catalog = StreamCatalog::builtin();
        let mut view = ViewController::default();
        let draft = StreamDraft::new(catalog.stream("DS-03").unwrap().clone(), &catalog);
        assert!(!view.open_editor(draft.clone()));

        view.set_mode(DashboardMode::Config);
        assert!(view.open_editor(draft));
        assert_eq!(view.draft().map(|d| d.stream().id.as_str()), Some("DS-03"));
    }

    #[test]
    fn test_decision_overlay_returns_to_background_mode() {
        let mut view = ViewController::default();
        view.set_mode(DashboardMode::Config);

        assert!(view.open_decision("DS-01"));
        assert_eq!(view.dashboard_view(), DashboardView::DecisionDetail);
        assert!(!view.open_decision("DS-01"));
        assert!(view.open_decision("DS-02"));

        assert_eq!(view.close_decision().as_deref(), Some("DS-02"));
        assert_eq!(view.dashboard_view(), DashboardView::ConfigList);

        view.set_mode(DashboardMode::Monitor);
        view.open_decision("DS-04");
        view.close_decision();
        assert_eq!(view.dashboard_view(), DashboardView::Monitor);
    }

    #[test]
    fn test_agent_center_transitions() {
        let catalog = StreamCatalog::builtin();
        let mut view = ViewController::default();

        view.open_agent(catalog.agent("A-003").unwrap().clone());
        assert_eq!(view.agent_center().tab(), Some(AgentTab::Info));
        view.set_agent_tab(AgentTab::Process);
        assert_eq!(view.agent_center().tab(), Some(AgentTab::Process));

        view.close_agent();
        assert_eq!(view.agent_center(), &AgentCenterMode::List);
        assert_eq!(view.agent_center().tab(), None);

        view.open_agent(catalog.agent("A-001").unwrap().clone());
        assert_eq!(view.agent_center().tab(), Some(AgentTab::Info));
    }

    #[test]
    fn test_create_agent_uses_blank_template_and_resets_tab() {
        let mut view = ViewController::default();
        view.create_agent();
        view.set_agent_tab(AgentTab::Process);
        view.create_agent();

        match view.agent_center() {
            AgentCenterMode::Create { agent, tab } => {
                assert_eq!(agent.id, crate::catalog::NEW_AGENT_ID);
                assert_eq!(*tab, AgentTab::Info);
            }
            other => panic!("expected Create, got {:?}", other),
        }
    }

    #[test]
    fn test_agent_center_is_independent_of_dashboard() {
        let catalog = StreamCatalog::builtin();
        let mut view = ViewController::default();
        view.open_decision("DS-04");
        view.switch_screen(Screen::AgentCenter);
        view.open_agent(catalog.agent("A-008").unwrap().clone());
        view.set_agent_tab(AgentTab::Process);

        view.switch_screen(Screen::Dashboard);
        assert_eq!(view.selected_decision(), Some("DS-04"));
        view.close_decision();
        assert_eq!(view.agent_center().tab(), Some(AgentTab::Process));
    }
}
