use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::BuildResult;

pub fn print_summary(result: &BuildResult) {
    let stats = &result.stats;
    println!("Relation: {}", result.relation);
    println!("Output: {}", result.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Relations read"), Cell::new(stats.relations)]);
    table.add_row(vec![
        Cell::new("Unresolved generics"),
        count_cell(stats.unresolved, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Merged records"), Cell::new(stats.merged)]);
    table.add_row(vec![
        Cell::new("Self references dropped"),
        Cell::new(stats.self_references),
    ]);
    table.add_row(vec![
        Cell::new("Foreign canonicals dropped"),
        Cell::new(stats.foreign_canonicals),
    ]);
    table.add_row(vec![Cell::new("Distinct terms"), Cell::new(stats.distinct_terms)]);
    table.add_row(vec![
        Cell::new("Ambiguous terms removed"),
        count_cell(stats.ambiguous_terms, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Ambiguous share"),
        Cell::new(format!("{:.2}%", stats.ambiguous_percentage())),
    ]);
    table.add_row(vec![
        Cell::new("Phrase collisions"),
        Cell::new(stats.phrase_collisions),
    ]);
    table.add_row(vec![
        Cell::new("Lexicon entries")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.entries).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Alternatives")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.alternatives).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    match &result.artifacts {
        Some(paths) => {
            println!("Artifacts:");
            for path in paths.all() {
                println!("- {}", path.display());
            }
        }
        None => println!("Dry run: no artifacts written."),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
