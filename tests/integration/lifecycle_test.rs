//! A sprint from first task to last, through the CLI

use super::Workspace;

fn progress(ws: &Workspace, board: &str) -> f64 {
    ws.json(&["board", "show", board])["board"]["progress"].as_f64().unwrap()
}

fn column_labels(ws: &Workspace, board: &str, index: usize) -> Vec<String> {
    ws.json(&["board", "show", board])["columns"][index]["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["label"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_sprint_lifecycle() {
    let ws = Workspace::new();
    ws.json(&["board", "create", "Sprint 7", "-d", "Ship the importer"]);
    for title in ["Parse input", "Map fields", "Write rows"] {
        ws.json(&["task", "add", "Sprint 7", title, "-d", "Importer work"]);
    }
    assert_eq!(column_labels(&ws, "Sprint 7", 0), ["KAN-1", "KAN-2", "KAN-3"]);
    assert!(progress(&ws, "Sprint 7").abs() < f64::EPSILON);

    // drag KAN-3 to the top of the column
    ws.json(&["task", "move", "KAN-3", "todo", "--before", "KAN-1"]);
    assert_eq!(column_labels(&ws, "Sprint 7", 0), ["KAN-3", "KAN-1", "KAN-2"]);

    // start and finish one task
    ws.json(&["task", "move", "KAN-3", "in_progress"]);
    assert_eq!(column_labels(&ws, "Sprint 7", 1), ["KAN-3"]);
    ws.json(&["task", "update", "KAN-3", "-s", "done"]);
    assert_eq!(column_labels(&ws, "Sprint 7", 2), ["KAN-3"]);
    assert!((progress(&ws, "Sprint 7") - 100.0 / 3.0).abs() < 1e-9);

    // park one for later; it stays open
    ws.json(&["task", "move", "KAN-2", "later"]);
    assert_eq!(column_labels(&ws, "Sprint 7", 3), ["KAN-2"]);
    assert!((progress(&ws, "Sprint 7") - 100.0 / 3.0).abs() < 1e-9);

    let stats = ws.json(&["stats"]);
    assert_eq!(stats["total_tasks"], 3);
    assert_eq!(stats["by_status"]["done"], 1);
    assert_eq!(stats["by_status"]["saved_for_later"], 1);

    // reordering the todo column requires every task in it
    ws.json(&["task", "add", "Sprint 7", "Docs", "-d", "Importer docs"]);
    let column = ws.json(&["task", "reorder", "Sprint 7", "todo", "KAN-4", "KAN-1"]);
    let keys: Vec<f64> = column["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["order_key"].as_f64().unwrap())
        .collect();
    assert_eq!(keys, [1.0, 2.0]);

    // deleting the done task drops progress back to zero
    ws.json(&["task", "delete", "KAN-3"]);
    assert!(progress(&ws, "Sprint 7").abs() < f64::EPSILON);

    let deleted = ws.json(&["board", "delete", "Sprint 7"]);
    assert_eq!(deleted["message"], "Deleted board 'Sprint 7' and 3 task(s)");
    assert_eq!(ws.json(&["stats"])["total_tasks"], 0);
}
