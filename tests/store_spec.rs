use speculate2::speculate;
use stepwise::models::*;
use stepwise::parser::parse_response;
use stepwise::store::{ChecklistStore, StoreError};
use uuid::Uuid;

const ANSWER: &str = "Task 1: Prepare
1. Clear the desk
2. Open the box
[Image: parts on the desk]
Task 2: Assemble
1. Attach the legs";

fn create_test_checklist(store: &ChecklistStore) -> Checklist {
    store.create_checklist("assemble a chair", parse_response(ANSWER))
}

speculate! {
    before {
        let store = ChecklistStore::new();
    }

    describe "checklists" {
        describe "create_checklist" {
            it "stores the parsed tasks with the trimmed question" {
                let checklist = store.create_checklist("  assemble a chair \n", parse_response(ANSWER));

                assert_eq!(checklist.question, "assemble a chair");
                assert_eq!(checklist.tasks.len(), 2);
                assert!(checklist.expanded.is_empty());
                assert_eq!(checklist.progress(), (0, 3));
            }
        }

        describe "get_checklist" {
            it "returns None for an unknown id" {
                assert!(store.get_checklist(Uuid::new_v4()).is_none());
            }

            it "returns the checklist by id" {
                let created = create_test_checklist(&store);
                let found = store.get_checklist(created.id).expect("checklist exists");

                assert_eq!(found.id, created.id);
                assert_eq!(found.tasks, created.tasks);
            }
        }

        describe "list_checklists" {
            it "returns an empty list when nothing was asked" {
                assert!(store.list_checklists().is_empty());
            }

            it "summarizes every checklist" {
                let first = create_test_checklist(&store);
                let second = store.create_checklist("boil an egg", parse_response("Task 1: Boil\n1. Heat water"));

                let summaries = store.list_checklists();
                assert_eq!(summaries.len(), 2);

                let summary = summaries.iter().find(|s| s.id == first.id).expect("listed");
                assert_eq!(summary.task_count, 2);
                assert_eq!(summary.subtask_count, 3);
                assert_eq!(summary.completed_count, 0);
                assert!(summaries.iter().any(|s| s.id == second.id));
            }

            it "lists the newest checklist first" {
                let first = create_test_checklist(&store);
                let second = create_test_checklist(&store);
                let third = create_test_checklist(&store);

                let ids: Vec<Uuid> = store.list_checklists().iter().map(|s| s.id).collect();
                assert_eq!(ids, vec![third.id, second.id, first.id]);
            }

            it "keeps the order after a delete" {
                let first = create_test_checklist(&store);
                let second = create_test_checklist(&store);
                let third = create_test_checklist(&store);
                store.delete_checklist(second.id);

                let ids: Vec<Uuid> = store.list_checklists().iter().map(|s| s.id).collect();
                assert_eq!(ids, vec![third.id, first.id]);
            }
        }

        describe "delete_checklist" {
            it "removes the checklist" {
                let checklist = create_test_checklist(&store);

                assert!(store.delete_checklist(checklist.id));
                assert!(store.get_checklist(checklist.id).is_none());
            }

            it "returns false for an unknown id" {
                assert!(!store.delete_checklist(Uuid::new_v4()));
            }
        }
    }

    describe "subtasks" {
        describe "toggle_subtask" {
            it "marks a subtask completed and back" {
                let checklist = create_test_checklist(&store);
                let task = &checklist.tasks[0];
                let subtask = &task.subtasks[1];

                let toggled = store.toggle_subtask(checklist.id, task.id, subtask.id).expect("found");
                assert!(toggled.completed);
                assert_eq!(toggled.text, "Open the box");

                let stored = store.get_checklist(checklist.id).unwrap();
                assert!(stored.tasks[0].subtasks[1].completed);
                assert!(!stored.tasks[0].subtasks[0].completed);
                assert_eq!(stored.progress(), (1, 3));

                let toggled = store.toggle_subtask(checklist.id, task.id, subtask.id).expect("found");
                assert!(!toggled.completed);
            }

            it "requires the subtask to belong to the given task" {
                let checklist = create_test_checklist(&store);
                let other_task = &checklist.tasks[1];
                let subtask = &checklist.tasks[0].subtasks[0];

                assert!(store.toggle_subtask(checklist.id, other_task.id, subtask.id).is_none());
                assert_eq!(store.get_checklist(checklist.id).unwrap().progress(), (0, 3));
            }

            it "returns None for unknown ids" {
                let checklist = create_test_checklist(&store);
                let task = &checklist.tasks[0];

                assert!(store.toggle_subtask(Uuid::new_v4(), task.id, task.subtasks[0].id).is_none());
                assert!(store.toggle_subtask(checklist.id, Uuid::new_v4(), task.subtasks[0].id).is_none());
                assert!(store.toggle_subtask(checklist.id, task.id, Uuid::new_v4()).is_none());
            }
        }
    }

    describe "tasks" {
        describe "toggle_expanded" {
            it "expands and collapses a task" {
                let checklist = create_test_checklist(&store);
                let task_id = checklist.tasks[1].id;

                assert_eq!(store.toggle_expanded(checklist.id, task_id), Some(true));
                assert!(store.get_checklist(checklist.id).unwrap().is_expanded(task_id));

                assert_eq!(store.toggle_expanded(checklist.id, task_id), Some(false));
                assert!(!store.get_checklist(checklist.id).unwrap().is_expanded(task_id));
            }

            it "leaves subtasks untouched" {
                let checklist = create_test_checklist(&store);
                store.toggle_expanded(checklist.id, checklist.tasks[0].id);

                assert_eq!(store.get_checklist(checklist.id).unwrap().tasks, checklist.tasks);
            }

            it "returns None for an unknown task" {
                let checklist = create_test_checklist(&store);
                assert!(store.toggle_expanded(checklist.id, Uuid::new_v4()).is_none());
            }
        }

        describe "add_task" {
            it "appends a trimmed task with no steps" {
                let checklist = create_test_checklist(&store);

                let task = store.add_task(checklist.id, "  Tidy up  ").unwrap().expect("checklist exists");
                assert_eq!(task.text, "Tidy up");
                assert!(task.subtasks.is_empty());
                assert!(task.media.is_none());

                let stored = store.get_checklist(checklist.id).unwrap();
                assert_eq!(stored.tasks.len(), 3);
                assert_eq!(stored.tasks[2].id, task.id);
                assert_eq!(stored.tasks[0].text, "Task 1: Prepare");
            }

            it "rejects blank text" {
                let checklist = create_test_checklist(&store);
                assert_eq!(store.add_task(checklist.id, "   "), Err(StoreError::EmptyText));
                assert_eq!(store.get_checklist(checklist.id).unwrap().tasks.len(), 2);
            }

            it "returns None for an unknown checklist" {
                assert_eq!(store.add_task(Uuid::new_v4(), "Something"), Ok(None));
            }
        }
    }

    describe "sharing" {
        it "sees changes made through a clone" {
            let checklist = create_test_checklist(&store);
            let handle = store.clone();
            let task = &checklist.tasks[1];

            handle.toggle_subtask(checklist.id, task.id, task.subtasks[0].id);
            assert_eq!(store.get_checklist(checklist.id).unwrap().progress(), (1, 3));
        }
    }
}
