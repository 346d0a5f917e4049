/// Flagged Interviews Example
///
/// This example demonstrates:
/// - Loading a table from a configuration document and an API payload
/// - Status columns sorted in workflow order
/// - Driving the table with JSON-encoded UI actions
/// - Discarding a stale refresh

use talentgrid::{load_table, records_from_json, ViewResponse};

const CONFIG: &str = r#"{
    "fields": [
        {"name": "candidate", "type": "text", "label": "Candidate"},
        {"name": "trustScore", "type": "number", "label": "Trust"},
        {"name": "interviewedAt", "type": "date", "label": "Interviewed"},
        {"name": "flags", "type": "textList", "label": "Flags"},
        {"name": "status", "type": "status", "statuses": ["pending", "reviewed", "escalated"]}
    ],
    "searchableFields": ["candidate", "flags"],
    "pageSizeOptions": [5, 20],
    "initialSort": {"field": "trustScore", "direction": "ascending"}
}"#;

const PAYLOAD: &str = r#"[
    {"candidate": "Dana Ortiz", "trustScore": 41.5, "interviewedAt": "2024-03-04T10:00:00Z",
     "flags": ["tab switching", "second voice"], "status": "escalated"},
    {"candidate": "Eli Park", "trustScore": 88, "interviewedAt": "2024-03-01", "flags": [], "status": "reviewed"},
    {"candidate": "Fay Chen", "trustScore": null, "interviewedAt": "not recorded",
     "flags": ["gaze away"], "status": "pending"},
    {"candidate": "Gus Moore", "trustScore": "62", "interviewedAt": "2024-02-28 16:30:00",
     "flags": ["tab switching"], "status": "reviewed"}
]"#;

fn show(label: &str, response: ViewResponse) {
    println!("{}", label);
    match response {
        ViewResponse::View { result } => {
            for record in &result.windowed {
                println!(
                    "      {:<12} trust {:>4}  {:<10} {}",
                    record.text("candidate"),
                    record.text("trustScore"),
                    record.text("status"),
                    record.text("flags")
                );
            }
        }
        ViewResponse::Error { message } => println!("      error: {}", message),
    }
    println!();
}

fn main() {
    println!("=== talentgrid Flagged Interviews Example ===\n");

    let mut table = load_table(CONFIG, PAYLOAD).unwrap();
    println!("Loaded {} flagged interviews (lowest trust first)\n", table.records().len());

    show("1. Search flags for \"tab\":", table.handle_json(r#"{"type": "SetQuery", "query": "tab"}"#));
    show("2. Sort by status:", table.handle_json(r#"{"type": "ToggleSort", "field": "status"}"#));
    show("3. Unknown column:", table.handle_json(r#"{"type": "ToggleSort", "field": "salary"}"#));
    show("4. Clear search:", table.handle_json(r#"{"type": "SetQuery", "query": ""}"#));

    // Two refreshes race; only the later one may land
    println!("5. Two overlapping refreshes...");
    let slow = table.begin_refresh();
    let fast = table.begin_refresh();

    let fresh = records_from_json(
        r#"[{"candidate": "Ivy Diaz", "trustScore": 35, "flags": ["face mismatch"], "status": "pending"}]"#,
        table.config(),
    )
    .unwrap();
    println!("   fast refresh: {:?}", table.complete_refresh(fast, fresh));

    let stale = records_from_json(r#"[]"#, table.config()).unwrap();
    println!("   slow refresh: {:?}", table.complete_refresh(slow, stale));
    println!("   rows now shown: {}\n", table.view().total_count);

    println!("=== Example Complete ===");
}
