//! Tests for #[derive(Action)] macro

use chrono::NaiveDate;
use tasklist_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum ChecklistAction {
    #[command]
    AddItem {
        label: String,
        due: Option<NaiveDate>,
    },

    #[command]
    ClearDone,

    #[command]
    Rename(String),

    #[event]
    ItemAdded { id: u32, label: String },

    #[event]
    DoneCleared(usize),

    Tick,
}

#[test]
fn test_is_command() {
    let action = ChecklistAction::AddItem {
        label: "Water plants".to_string(),
        due: None,
    };
    assert!(action.is_command());
    assert!(!action.is_event());
}

#[test]
fn test_is_event() {
    let action = ChecklistAction::ItemAdded {
        id: 1,
        label: "Water plants".to_string(),
    };
    assert!(!action.is_command());
    assert!(action.is_event());
}

#[test]
fn test_unmarked_variant_is_neither() {
    assert!(!ChecklistAction::Tick.is_command());
    assert!(!ChecklistAction::Tick.is_event());
}

#[test]
fn test_all_commands_identified() {
    let commands = vec![
        ChecklistAction::AddItem {
            label: "Test".to_string(),
            due: NaiveDate::from_ymd_opt(2024, 1, 5),
        },
        ChecklistAction::ClearDone,
        ChecklistAction::Rename("Chores".to_string()),
    ];

    for cmd in commands {
        assert!(cmd.is_command(), "Expected command: {cmd:?}");
        assert!(!cmd.is_event(), "Should not be event: {cmd:?}");
    }
}

#[test]
fn test_names_follow_variants() {
    let cases = vec![
        (ChecklistAction::ClearDone, "ClearDone"),
        (ChecklistAction::Rename(String::new()), "Rename"),
        (
            ChecklistAction::ItemAdded {
                id: 7,
                label: String::new(),
            },
            "ItemAdded",
        ),
        (ChecklistAction::DoneCleared(2), "DoneCleared"),
        (ChecklistAction::Tick, "Tick"),
    ];

    for (action, expected) in cases {
        assert_eq!(action.name(), expected);
    }
}

#[test]
fn test_helpers_are_const() {
    const ACTION: ChecklistAction = ChecklistAction::ClearDone;
    const IS_COMMAND: bool = ACTION.is_command();
    const NAME: &str = ACTION.name();

    assert!(IS_COMMAND);
    assert_eq!(NAME, "ClearDone");
}
