/// Candidates Example
///
/// This example demonstrates:
/// - Declaring a candidate table's fields
/// - Searching across name and skills
/// - Sorting by a column and toggling its direction
/// - Paging through the result

use talentgrid::{FieldDescriptor, Record, TableConfig, TableView, ViewResult};

fn print_page(result: &ViewResult) {
    match result.item_range() {
        Some((first, last)) => println!(
            "   Showing {}-{} of {} (page {}/{})",
            first,
            last,
            result.total_count,
            result.current_page + 1,
            result.page_count
        ),
        None => println!("   No matching candidates"),
    }
    for record in &result.windowed {
        println!(
            "      - {:<14} score {:>3}  skills: {}",
            record.text("name"),
            record.text("score"),
            record.text("skills")
        );
    }
    println!();
}

fn main() {
    println!("=== talentgrid Candidates Example ===\n");

    // 1. Declare the table
    println!("1. Declaring candidate fields...");
    let config = TableConfig::new(
        vec![
            FieldDescriptor::text("name").searchable().with_label("Candidate"),
            FieldDescriptor::text("job").searchable().with_label("Applied for"),
            FieldDescriptor::number("score").with_label("Score"),
            FieldDescriptor::date("appliedAt").with_label("Applied"),
            FieldDescriptor::text_list("skills").searchable().with_label("Skills"),
        ],
        vec![3, 10],
    )
    .unwrap();

    let candidates = vec![
        ("Priya Nair", "Backend Engineer", 84, "2024-02-11", vec!["Rust", "Postgres"]),
        ("Tom Becker", "Data Analyst", 71, "2024-02-09", vec!["SQL", "Python"]),
        ("Lena Fischer", "Backend Engineer", 92, "2024-02-14", vec!["Go", "Kubernetes"]),
        ("Omar Haddad", "Frontend Engineer", 71, "2024-02-10", vec!["React", "TypeScript"]),
        ("Sara Lind", "Backend Engineer", 65, "2024-02-12", vec!["Rust", "gRPC"]),
        ("Ken Sato", "Data Analyst", 88, "2024-02-08", vec!["Python", "dbt"]),
        ("Ana Costa", "Frontend Engineer", 77, "2024-02-13", vec!["Vue", "CSS"]),
    ];

    let records: Vec<Record> = candidates
        .into_iter()
        .map(|(name, job, score, applied, skills)| {
            Record::new()
                .with("name", name)
                .with("job", job)
                .with("score", score)
                .with("appliedAt", applied)
                .with("skills", skills.into_iter().map(String::from).collect::<Vec<_>>())
        })
        .collect();

    let mut table = TableView::new(config).with_records(records);
    println!("   Loaded {} candidates\n", table.records().len());

    // 2. First page, original order
    println!("2. First page (no sort)...");
    print_page(table.view());

    // 3. Sort by score
    println!("3. Clicking the Score header (ascending)...");
    table.toggle_sort("score").unwrap();
    print_page(table.view());

    println!("4. Clicking it again (descending)...");
    table.toggle_sort("score").unwrap();
    print_page(table.view());

    // 5. Page forward, then search
    println!("5. Moving to the last page...");
    table.set_page(2);
    print_page(table.view());

    println!("6. Searching for \"rust\" while on page 3...");
    table.set_query("rust");
    print_page(table.view());

    // 7. Larger pages
    println!("7. Clearing the search and showing 10 per page...");
    table.set_query("");
    table.set_page_size(10).unwrap();
    print_page(table.view());

    println!("=== Example Complete ===");
}
