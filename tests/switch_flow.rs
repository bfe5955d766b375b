//! Integration tests for the work and sandbox switch flows
//!
//! These drive the full flow (mode detection, snapshot capture, storage and
//! restore) against a recording automation backend and a temporary state
//! directory, so no real applications or browsers are touched.

use anyhow::Result;
use std::fs::{self, File};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tempfile::TempDir;
use workswitch::automation::fake::{Call, FakeAutomation};
use workswitch::profile::{ModeDetector, ProfileSnapshot, ProfileStore, Slot, StoreConfig};
use workswitch::switcher::{
    AssumeYes, Confirm, SwitchOptions, SwitchOutcome, SwitchPlan, Switcher, TerminalPrompt,
};

fn setup_store() -> (TempDir, ProfileStore) {
    let temp = TempDir::new().unwrap();
    let store = ProfileStore::new(StoreConfig::new(temp.path()));
    (temp, store)
}

fn snapshot(apps: &[&str], tabs: &[&str]) -> ProfileSnapshot {
    ProfileSnapshot {
        timestamp: "2024-03-01T09:30:00.000000".to_string(),
        running_apps: apps.iter().map(|s| s.to_string()).collect(),
        chrome_tabs: tabs.iter().map(|s| s.to_string()).collect(),
    }
}

fn set_mtime(store: &ProfileStore, slot: Slot, secs: u64) {
    File::options()
        .write(true)
        .open(store.path(slot))
        .unwrap()
        .set_modified(UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

fn timestamps_only() -> SwitchOptions {
    SwitchOptions {
        use_mode_marker: false,
        ..SwitchOptions::default()
    }
}

struct Decline;

impl Confirm for Decline {
    fn confirm(&mut self, _plan: &SwitchPlan) -> Result<bool> {
        Ok(false)
    }
}

#[test]
fn test_declining_performs_no_writes_and_no_commands() -> Result<()> {
    let (temp, store) = setup_store();
    let fake = FakeAutomation::new()
        .with_apps(&["Finder"])
        .with_tabs(&["https://a.test"]);
    let switcher = Switcher::new(&store, &fake, SwitchOptions::default());

    let mut prompt = TerminalPrompt::new("no\n".as_bytes(), Vec::new());
    assert_eq!(
        switcher.switch_to(Slot::Work, &mut prompt)?,
        SwitchOutcome::Cancelled
    );
    assert_eq!(switcher.start_sandbox(&mut Decline)?, SwitchOutcome::Cancelled);

    assert!(fake.calls().is_empty());
    assert_eq!(fs::read_dir(temp.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_restore_opens_tabs_in_saved_order() -> Result<()> {
    let (_temp, store) = setup_store();
    store.save(
        Slot::Work,
        &snapshot(&[], &["https://a.test", "https://b.test"]),
    )?;
    let fake = FakeAutomation::new();
    let switcher = Switcher::new(&store, &fake, SwitchOptions::default());

    switcher.switch_to(Slot::Work, &mut AssumeYes)?;

    assert_eq!(fake.opened_tabs(), vec!["https://a.test", "https://b.test"]);
    Ok(())
}

#[test]
fn test_missing_app_does_not_abort_restore() -> Result<()> {
    let (_temp, store) = setup_store();
    store.save(
        Slot::Work,
        &snapshot(&["Slack", "Ghost App", "Visual Studio Code"], &["https://a.test"]),
    )?;
    let fake = FakeAutomation::new().with_missing_apps(&["Ghost App"]);
    let switcher = Switcher::new(&store, &fake, SwitchOptions::default());

    let outcome = switcher.switch_to(Slot::Work, &mut AssumeYes)?;

    assert_eq!(
        fake.launched_apps(),
        vec!["Slack", "Ghost App", "Visual Studio Code"]
    );
    match outcome {
        SwitchOutcome::Restored {
            apps_launched,
            apps_failed,
            tabs_opened,
            ..
        } => {
            assert_eq!(apps_launched, vec!["Slack", "Visual Studio Code"]);
            assert_eq!(apps_failed, vec!["Ghost App"]);
            assert_eq!(tabs_opened, 1);
        }
        other => panic!("expected a restore, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_work_switch_saves_outgoing_as_personal() -> Result<()> {
    let (_temp, store) = setup_store();
    let fake = FakeAutomation::new()
        .with_apps(&["Music", "Messages"])
        .with_tabs(&["https://home.test"]);
    let switcher = Switcher::new(&store, &fake, SwitchOptions::default());

    let outcome = switcher.switch_to(Slot::Work, &mut AssumeYes)?;

    assert_eq!(outcome.saved_as(), Some(Slot::Personal));
    let personal = store.load(Slot::Personal)?.expect("personal slot saved");
    assert_eq!(personal.running_apps, vec!["Music", "Messages"]);
    assert_eq!(personal.chrome_tabs, vec!["https://home.test"]);
    assert!(store.load(Slot::Work)?.is_none());
    Ok(())
}

#[test]
fn test_sandbox_in_work_mode_saves_to_work_slot() -> Result<()> {
    let (_temp, store) = setup_store();
    store.save(Slot::Personal, &snapshot(&["Music"], &[]))?;
    store.save(Slot::Work, &snapshot(&["Slack"], &[]))?;
    set_mtime(&store, Slot::Personal, 1_700_000_000);
    set_mtime(&store, Slot::Work, 1_700_000_500);

    let fake = FakeAutomation::new()
        .with_apps(&["Terminal"])
        .with_tabs(&["https://docs.test"]);
    let switcher = Switcher::new(&store, &fake, timestamps_only());

    let outcome = switcher.start_sandbox(&mut AssumeYes)?;

    assert_eq!(outcome, SwitchOutcome::Sandbox { saved_as: Slot::Work });
    let work = store.load(Slot::Work)?.unwrap();
    assert_eq!(work.running_apps, vec!["Terminal"]);
    assert_eq!(work.chrome_tabs, vec!["https://docs.test"]);
    let personal = store.load(Slot::Personal)?.unwrap();
    assert_eq!(personal.running_apps, vec!["Music"]);

    assert_eq!(fake.calls().last(), Some(&Call::OpenBrowserWindow));
    Ok(())
}

#[test]
fn test_sandbox_with_no_state_saves_to_personal() -> Result<()> {
    let (_temp, store) = setup_store();
    let fake = FakeAutomation::new().with_apps(&["Finder"]);
    let switcher = Switcher::new(&store, &fake, SwitchOptions::default());

    let outcome = switcher.start_sandbox(&mut AssumeYes)?;

    assert_eq!(outcome.saved_as(), Some(Slot::Personal));
    assert!(store.load(Slot::Personal)?.is_some());
    assert!(store.load(Slot::Work)?.is_none());
    Ok(())
}

#[test]
fn test_enumeration_failure_still_saves_empty_snapshot() -> Result<()> {
    let (_temp, store) = setup_store();
    let fake = FakeAutomation::new().failing_enumeration();
    let switcher = Switcher::new(&store, &fake, SwitchOptions::default());

    switcher.switch_to(Slot::Work, &mut AssumeYes)?;

    let personal = store.load(Slot::Personal)?.unwrap();
    assert!(personal.running_apps.is_empty());
    assert!(personal.chrome_tabs.is_empty());
    assert!(fake.calls().contains(&Call::CloseBrowserWindows));
    Ok(())
}

#[test]
fn test_whitespace_only_slot_file_starts_fresh_session() -> Result<()> {
    let (_temp, store) = setup_store();
    fs::write(store.path(Slot::Work), "  \n")?;
    let fake = FakeAutomation::new().with_apps(&["Finder"]);
    let switcher = Switcher::new(&store, &fake, SwitchOptions::default());

    let outcome = switcher.switch_to(Slot::Work, &mut AssumeYes)?;

    assert_eq!(
        outcome,
        SwitchOutcome::FreshSession {
            saved_as: Slot::Personal,
            target: Slot::Work,
        }
    );
    assert_eq!(store.read_marker(), Some(Slot::Work));
    assert!(fake.opened_tabs().is_empty());
    assert!(fake.launched_apps().is_empty());
    // The blank file is left as it was, not rewritten.
    assert_eq!(fs::read_to_string(store.path(Slot::Work))?, "  \n");
    Ok(())
}

#[test]
fn test_round_trip_work_then_personal() -> Result<()> {
    let (_temp, store) = setup_store();
    store.save(Slot::Work, &snapshot(&["Slack"], &["https://work.test"]))?;

    let at_home = FakeAutomation::new()
        .with_apps(&["Music"])
        .with_tabs(&["https://home.test"]);
    Switcher::new(&store, &at_home, SwitchOptions::default())
        .switch_to(Slot::Work, &mut AssumeYes)?;
    assert_eq!(
        ModeDetector::new(&store, true).current_mode(),
        Slot::Work
    );

    let at_work = FakeAutomation::new()
        .with_apps(&["Slack", "Zoom"])
        .with_tabs(&["https://work.test"]);
    Switcher::new(&store, &at_work, SwitchOptions::default())
        .switch_to(Slot::Personal, &mut AssumeYes)?;

    assert_eq!(at_work.opened_tabs(), vec!["https://home.test"]);
    assert_eq!(at_work.launched_apps(), vec!["Music"]);
    assert_eq!(
        store.load(Slot::Work)?.unwrap().running_apps,
        vec!["Slack", "Zoom"]
    );
    assert_eq!(
        ModeDetector::new(&store, true).current_mode(),
        Slot::Personal
    );
    Ok(())
}

#[test]
fn test_detect_outgoing_uses_current_mode() -> Result<()> {
    let (_temp, store) = setup_store();
    store.write_marker(Slot::Work)?;
    let fake = FakeAutomation::new().with_apps(&["Slack"]);
    let options = SwitchOptions {
        detect_outgoing: true,
        ..SwitchOptions::default()
    };
    let switcher = Switcher::new(&store, &fake, options);

    let outcome = switcher.switch_to(Slot::Work, &mut AssumeYes)?;

    assert_eq!(outcome.saved_as(), Some(Slot::Work));
    assert!(store.load(Slot::Personal)?.is_none());
    // The freshly saved work state is what gets restored.
    assert_eq!(fake.launched_apps(), vec!["Slack"]);
    Ok(())
}

#[test]
fn test_mode_detector_tie_defaults_to_personal() {
    let (_temp, store) = setup_store();
    store.save(Slot::Work, &ProfileSnapshot::default()).unwrap();
    store.save(Slot::Personal, &ProfileSnapshot::default()).unwrap();
    set_mtime(&store, Slot::Work, 1_700_000_000);
    set_mtime(&store, Slot::Personal, 1_700_000_000);

    let detector = ModeDetector::new(&store, false);
    assert_eq!(detector.current_mode(), Slot::Personal);

    set_mtime(&store, Slot::Work, 1_700_000_001);
    assert_eq!(detector.current_mode(), Slot::Work);
}

#[test]
fn test_fresh_save_is_newer_than_old_file() {
    let (_temp, store) = setup_store();
    store.save(Slot::Personal, &ProfileSnapshot::default()).unwrap();
    set_mtime(&store, Slot::Personal, 1_000);

    store.save(Slot::Work, &ProfileSnapshot::default()).unwrap();
    let work_time = store.modified(Slot::Work).unwrap();
    assert!(work_time > UNIX_EPOCH + Duration::from_secs(1_000));
    assert!(work_time <= SystemTime::now() + Duration::from_secs(5));

    assert_eq!(ModeDetector::new(&store, false).current_mode(), Slot::Work);
}
