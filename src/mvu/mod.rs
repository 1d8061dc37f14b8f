// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Root Model-View-Update kernel wiring drive state, messages, and
//! commands.
//!
//! The engine runs on a single worker thread and sees blocking `Interact`
//! calls; here those calls become `PromptRequest` messages carrying a
//! reply channel. The worker parks on `recv()` until the operator answers
//! the modal, which keeps classification strictly sequential: exactly one
//! prompt can exist at a time.

use crossbeam_channel::Sender;

use crate::logic::engine::{self, DriveSnapshot, RunReport};
use crate::logic::interact::{FallbackAction, Interact, OsAnswer};
use crate::logic::layout::DriveLayout;

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Last good drive snapshot; `None` until the first load (or after a
    /// fatal precondition failure).
    pub snapshot: Option<DriveSnapshot>,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in a modal.
    pub error: Option<String>,
    /// Non-fatal warnings from the last run, shown in a dismissible modal.
    pub warnings: Vec<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
    /// Prompt currently blocking the engine worker, if any.
    pub prompt: Option<PromptRequest>,
    /// Whether the classify-confirmation modal is open.
    pub confirm_classify: bool,
    /// Whether the theme picker modal is open.
    pub theme_picker_open: bool,
    /// Theme we just switched to, while the rescan question is pending.
    pub rescan_offer: Option<String>,
    /// Text buffer for the custom entry in the OS prompt.
    pub os_input: String,
}

/// Which engine run a `RunFinished` message reports on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunAction {
    Classify,
    Rescan,
}

impl RunAction {
    pub fn label(&self) -> &'static str {
        match self {
            RunAction::Classify => "Classification",
            RunAction::Rescan => "Icon rescan",
        }
    }
}

/// A prompt the engine worker is blocked on. The `reply` sender feeds the
/// answer back into the parked `Interact` call.
pub enum PromptRequest {
    ChooseIcon {
        filename: String,
        candidates: Vec<String>,
        reply: Sender<Option<String>>,
    },
    MissingIcon {
        filename: String,
        detected: Option<String>,
        reply: Sender<FallbackAction>,
    },
    ClassifyOs {
        filename: String,
        reply: Sender<OsAnswer>,
    },
}

/// Operator answer for the active prompt, routed through `update`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptAnswer {
    Icon(Option<String>),
    Fallback(FallbackAction),
    Os(OsAnswer),
}

/// Application messages routed through the update function.
// Debug omitted because PromptRequest carries channel endpoints.
pub enum Msg {
    SnapshotLoaded(Result<DriveSnapshot, String>),
    RequestRefresh,
    RequestClassify,
    ClassifyConfirmed,
    ClassifyDeclined,
    RequestRescan,
    RequestThemePicker,
    ThemePickerClosed,
    ThemeChosen(String),
    ThemeSwitched {
        theme: String,
        result: Result<(), String>,
    },
    RescanOfferAnswered(bool),
    RunFinished {
        action: RunAction,
        result: Result<RunReport, String>,
    },
    PromptOpened(PromptRequest),
    PromptAnswered(PromptAnswer),
    OsInputChanged(String),
    ThemesFolderOpened(Result<(), String>),
    DismissError,
    DismissWarnings,
}

impl Msg {
    /// Whether this message is the terminal result of a command. Prompt
    /// messages arrive mid-command and must not release the busy counter.
    pub fn completes_command(&self) -> bool {
        matches!(
            self,
            Msg::SnapshotLoaded(_)
                | Msg::RunFinished { .. }
                | Msg::ThemeSwitched { .. }
                | Msg::ThemesFolderOpened(_)
        )
    }
}

/// Commands represent engine work executed on the worker thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    LoadSnapshot,
    ClassifyNewIsos,
    RescanIcons,
    ChangeTheme(String),
    OpenThemesFolder,
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::SnapshotLoaded(Ok(snapshot)) => model.snapshot = Some(snapshot),
        Msg::SnapshotLoaded(Err(err)) => {
            model.snapshot = None;
            model.error = Some(err);
        }
        Msg::RequestRefresh => cmds.push(Command::LoadSnapshot),
        Msg::RequestClassify => model.confirm_classify = true,
        Msg::ClassifyDeclined => model.confirm_classify = false,
        Msg::ClassifyConfirmed => {
            model.confirm_classify = false;
            cmds.push(Command::ClassifyNewIsos);
        }
        Msg::RequestRescan => cmds.push(Command::RescanIcons),
        Msg::RequestThemePicker => model.theme_picker_open = true,
        Msg::ThemePickerClosed => model.theme_picker_open = false,
        Msg::ThemeChosen(theme) => {
            model.theme_picker_open = false;
            cmds.push(Command::ChangeTheme(theme));
        }
        Msg::ThemeSwitched { theme, result } => match result {
            Ok(()) => {
                model.status = Some(format!("Theme changed to '{}'", theme));
                // Declining the rescan is allowed and leaves the old
                // classes on record; see the rescan-offer modal.
                model.rescan_offer = Some(theme);
                cmds.push(Command::LoadSnapshot);
            }
            Err(err) => model.error = Some(err),
        },
        Msg::RescanOfferAnswered(rescan) => {
            model.rescan_offer = None;
            if rescan {
                cmds.push(Command::RescanIcons);
            }
        }
        Msg::RunFinished { action, result } => match result {
            Ok(report) => {
                model.status = Some(format!(
                    "{} finished: {} ISO(s) processed, {} menu entries",
                    action.label(),
                    report.processed,
                    report.total_entries
                ));
                model.warnings = report.warnings;
                cmds.push(Command::LoadSnapshot);
            }
            Err(err) => {
                model.error = Some(err);
                cmds.push(Command::LoadSnapshot);
            }
        },
        Msg::PromptOpened(request) => {
            model.os_input.clear();
            model.prompt = Some(request);
        }
        Msg::PromptAnswered(answer) => answer_prompt(model, answer),
        Msg::OsInputChanged(text) => model.os_input = text,
        Msg::ThemesFolderOpened(result) => {
            if let Err(err) = result {
                model.error = Some(err);
            }
        }
        Msg::DismissError => model.error = None,
        Msg::DismissWarnings => model.warnings.clear(),
    }
}

/// Send the answer back to the parked engine worker and close the modal.
/// A mismatched answer kind leaves the prompt open.
fn answer_prompt(model: &mut AppModel, answer: PromptAnswer) {
    let Some(request) = model.prompt.take() else {
        return;
    };
    match (request, answer) {
        (PromptRequest::ChooseIcon { reply, .. }, PromptAnswer::Icon(choice)) => {
            let _ = reply.send(choice);
        }
        (PromptRequest::MissingIcon { reply, .. }, PromptAnswer::Fallback(action)) => {
            let _ = reply.send(action);
        }
        (PromptRequest::ClassifyOs { reply, .. }, PromptAnswer::Os(os)) => {
            let _ = reply.send(os);
        }
        (request, _) => model.prompt = Some(request),
    }
}

/// Execute a command on the worker thread and return the resulting
/// message. Prompts raised mid-run travel through `msg_tx`.
pub fn run_command(cmd: Command, layout: &DriveLayout, msg_tx: &Sender<Msg>) -> Msg {
    match cmd {
        Command::LoadSnapshot => {
            Msg::SnapshotLoaded(engine::snapshot(layout).map_err(|err| format!("{:#}", err)))
        }
        Command::ClassifyNewIsos => {
            let interact = UiInteract { msg_tx };
            Msg::RunFinished {
                action: RunAction::Classify,
                result: engine::classify_new_isos(layout, &interact)
                    .map_err(|err| format!("{:#}", err)),
            }
        }
        Command::RescanIcons => {
            let interact = UiInteract { msg_tx };
            Msg::RunFinished {
                action: RunAction::Rescan,
                result: engine::rescan_icons(layout, &interact).map_err(|err| format!("{:#}", err)),
            }
        }
        Command::ChangeTheme(theme) => Msg::ThemeSwitched {
            result: engine::change_theme(layout, &theme).map_err(|err| format!("{:#}", err)),
            theme,
        },
        Command::OpenThemesFolder => Msg::ThemesFolderOpened(
            open::that(layout.themes_dir())
                .map_err(|err| format!("Failed to open themes folder: {}", err)),
        ),
    }
}

/// `Interact` implementation that turns each blocking call into a prompt
/// message and parks on the reply channel. Dropped replies (the UI went
/// away) degrade the same way a declined prompt does.
struct UiInteract<'a> {
    msg_tx: &'a Sender<Msg>,
}

impl Interact for UiInteract<'_> {
    fn choose_icon(&self, filename: &str, candidates: &[String]) -> Option<String> {
        let (reply, answer) = crossbeam_channel::bounded(1);
        let _ = self.msg_tx.send(Msg::PromptOpened(PromptRequest::ChooseIcon {
            filename: filename.to_string(),
            candidates: candidates.to_vec(),
            reply,
        }));
        answer.recv().unwrap_or(None)
    }

    fn missing_icon_action(&self, filename: &str, detected: Option<&str>) -> FallbackAction {
        let (reply, answer) = crossbeam_channel::bounded(1);
        let _ = self
            .msg_tx
            .send(Msg::PromptOpened(PromptRequest::MissingIcon {
                filename: filename.to_string(),
                detected: detected.map(str::to_string),
                reply,
            }));
        answer.recv().unwrap_or(FallbackAction::UseUnknown)
    }

    fn pick_icon_file(&self) -> Option<std::path::PathBuf> {
        rfd::FileDialog::new()
            .set_title("Select an icon (.png)")
            .add_filter("PNG image", &["png"])
            .pick_file()
    }

    fn classify_os(&self, filename: &str) -> OsAnswer {
        let (reply, answer) = crossbeam_channel::bounded(1);
        let _ = self.msg_tx.send(Msg::PromptOpened(PromptRequest::ClassifyOs {
            filename: filename.to_string(),
            reply,
        }));
        answer.recv().unwrap_or(OsAnswer::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::models::MappingStore;

    #[test]
    fn snapshot_error_surfaces_in_the_error_modal() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::SnapshotLoaded(Err("No ventoy.json found".into())),
            &mut cmds,
        );

        assert!(model.snapshot.is_none());
        assert_eq!(model.error.as_deref(), Some("No ventoy.json found"));
        assert!(cmds.is_empty());
    }

    #[test]
    fn classification_runs_only_after_confirmation() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        update(&mut model, Msg::RequestClassify, &mut cmds);
        assert!(model.confirm_classify);
        assert!(cmds.is_empty());

        update(&mut model, Msg::ClassifyConfirmed, &mut cmds);
        assert!(!model.confirm_classify);
        assert_eq!(cmds, vec![Command::ClassifyNewIsos]);
    }

    #[test]
    fn choosing_a_theme_closes_the_picker_and_enqueues_the_switch() {
        let mut model = AppModel {
            theme_picker_open: true,
            ..Default::default()
        };
        let mut cmds = Vec::new();

        update(&mut model, Msg::ThemeChosen("Nord".into()), &mut cmds);

        assert!(!model.theme_picker_open);
        assert_eq!(cmds, vec![Command::ChangeTheme("Nord".into())]);
    }

    // Accepting the rescan offer starts a rescan; declining just drops the
    // offer and leaves the old classes on record.
    #[test]
    fn rescan_offer_follows_a_successful_theme_switch() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::ThemeSwitched {
                theme: "Nord".into(),
                result: Ok(()),
            },
            &mut cmds,
        );
        assert_eq!(model.rescan_offer.as_deref(), Some("Nord"));
        assert_eq!(cmds, vec![Command::LoadSnapshot]);

        cmds.clear();
        update(&mut model, Msg::RescanOfferAnswered(true), &mut cmds);
        assert!(model.rescan_offer.is_none());
        assert_eq!(cmds, vec![Command::RescanIcons]);

        update(
            &mut model,
            Msg::ThemeSwitched {
                theme: "Nord".into(),
                result: Ok(()),
            },
            &mut cmds,
        );
        cmds.clear();
        update(&mut model, Msg::RescanOfferAnswered(false), &mut cmds);
        assert!(model.rescan_offer.is_none());
        assert!(cmds.is_empty());
    }

    #[test]
    fn run_results_update_status_warnings_and_refresh() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::RunFinished {
                action: RunAction::Classify,
                result: Ok(RunReport {
                    processed: 2,
                    total_entries: 5,
                    warnings: vec!["no unknown.png".into()],
                }),
            },
            &mut cmds,
        );

        assert!(model.status.as_deref().unwrap().contains("2 ISO(s)"));
        assert_eq!(model.warnings, vec!["no unknown.png".to_string()]);
        assert_eq!(cmds, vec![Command::LoadSnapshot]);
    }

    #[test]
    fn answering_a_prompt_reaches_the_reply_channel_and_clears_it() {
        let (reply, answer) = crossbeam_channel::bounded(1);
        let mut model = AppModel {
            prompt: Some(PromptRequest::ChooseIcon {
                filename: "win-10-pro".into(),
                candidates: vec!["win10".into(), "win11".into()],
                reply,
            }),
            ..Default::default()
        };
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::PromptAnswered(PromptAnswer::Icon(Some("win10".into()))),
            &mut cmds,
        );

        assert!(model.prompt.is_none());
        assert_eq!(answer.try_recv().unwrap(), Some("win10".to_string()));
    }

    #[test]
    fn mismatched_answer_kind_keeps_the_prompt_open() {
        let (reply, _answer) = crossbeam_channel::bounded::<OsAnswer>(1);
        let mut model = AppModel {
            prompt: Some(PromptRequest::ClassifyOs {
                filename: "mystery".into(),
                reply,
            }),
            ..Default::default()
        };
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::PromptAnswered(PromptAnswer::Icon(None)),
            &mut cmds,
        );

        assert!(model.prompt.is_some());
    }

    /// Engine prompts must round-trip through the message channel while
    /// the worker blocks, the way the real UI answers them.
    #[test]
    fn worker_prompts_round_trip_through_the_channel() {
        let tmp = TempDir::new().unwrap();
        let config_dir = tmp.path().join("ventoy");
        let icon_dir = config_dir.join("Themes/Matrix/icons");
        std::fs::create_dir_all(&icon_dir).unwrap();
        std::fs::write(config_dir.join("Themes/Matrix/theme.txt"), b"").unwrap();
        std::fs::write(icon_dir.join("win10.png"), b"png").unwrap();
        std::fs::write(icon_dir.join("win11.png"), b"png").unwrap();
        std::fs::write(tmp.path().join("win-10-pro.iso"), b"").unwrap();
        std::fs::write(
            config_dir.join("ventoy.json"),
            r#"{"theme": {"file": "/ventoy/Themes/Matrix/theme.txt"}}"#,
        )
        .unwrap();

        let layout = DriveLayout::new(&config_dir);
        let mut store = MappingStore::default();
        store.insert("windows", vec!["windows".into(), "win".into()]);
        store.save(&layout.store_path()).unwrap();

        let (msg_tx, msg_rx) = crossbeam_channel::unbounded();
        let worker =
            std::thread::spawn(move || run_command(Command::ClassifyNewIsos, &layout, &msg_tx));

        match msg_rx.recv_timeout(Duration::from_secs(10)).unwrap() {
            Msg::PromptOpened(PromptRequest::ChooseIcon {
                filename,
                candidates,
                reply,
            }) => {
                assert_eq!(filename, "win-10-pro");
                assert_eq!(candidates, vec!["win10".to_string(), "win11".to_string()]);
                reply.send(Some("win11".into())).unwrap();
            }
            _ => panic!("expected an icon disambiguation prompt"),
        }

        match worker.join().unwrap() {
            Msg::RunFinished {
                action: RunAction::Classify,
                result: Ok(report),
            } => {
                assert_eq!(report.processed, 1);
                assert_eq!(report.total_entries, 1);
            }
            _ => panic!("expected a successful classification result"),
        }
    }
}
