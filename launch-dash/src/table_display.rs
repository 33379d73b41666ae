use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use crossterm::style::Stylize;
use launch_dash::figure::{Figure, Trace};

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect()
}

fn number(value: f64) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

/// Print the slices of a pie figure with their share of the total
pub fn display_pie(figure: &Figure) {
    println!("{}", figure.layout.title.text.as_str().bold());

    let Some(Trace::Pie { labels, values, .. }) = figure.data.first() else {
        println!("{}", "No data.".yellow());
        return;
    };
    if values.is_empty() {
        println!("{}", "No launches match this selection.".yellow());
        return;
    }

    let total: f64 = values.iter().sum();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header(&["Label", "Value", "Share"]));

    for (label, value) in labels.iter().zip(values) {
        let share = if total > 0.0 {
            format!("{:.1}%", value / total * 100.0)
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            Cell::new(label),
            number(*value),
            Cell::new(share).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
}

/// Summarize each color group of a scatter figure
pub fn display_scatter(figure: &Figure) {
    println!("{}", figure.layout.title.text.as_str().bold());

    if figure.is_empty() {
        println!("{}", "No launches in this payload range.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header(&[
        "Booster Version Category",
        "Launches",
        "Successes",
        "Min payload (kg)",
        "Max payload (kg)",
    ]));

    for trace in &figure.data {
        if let Trace::Scatter { x, y, name, .. } = trace {
            let successes = y.iter().filter(|&&c| c >= 1.0).count();
            let min = x.iter().copied().fold(f64::INFINITY, f64::min);
            let max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            table.add_row(vec![
                Cell::new(name),
                number(x.len() as f64),
                number(successes as f64),
                number(min),
                number(max),
            ]);
        }
    }

    println!("{table}");
    println!(
        "\n{}",
        format!("{} launches plotted", figure.point_count()).green()
    );
}
