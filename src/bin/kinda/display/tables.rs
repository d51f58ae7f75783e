use std::io::{self, Write};

use kinda_system::{Complex, CondensedReaction, RestingSet, System};

use crate::util::text::{sci, truncate};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Column {
    title: &'static str,
    width: usize,
    align: Align,
}

impl Column {
    const fn left(title: &'static str, width: usize) -> Self {
        Self {
            title,
            width,
            align: Align::Left,
        }
    }

    const fn right(title: &'static str, width: usize) -> Self {
        Self {
            title,
            width,
            align: Align::Right,
        }
    }
}

pub fn print_summary(rows: &[(&str, String)]) {
    let key_w = 24usize;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + 7);
    let columns = [Column::left("Metric", key_w), Column::right("Value", val_w)];

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|(key, value)| vec![key.to_string(), value.clone()])
        .collect();

    print_table(&mut io::stderr().lock(), "Network Summary", &columns, &body);
}

pub fn print_reactions(system: &System, reactions: &[&CondensedReaction]) {
    let origin_w = 8usize;
    let rate_w = 9usize;
    let reaction_w = SAFE_TABLE_WIDTH.saturating_sub(origin_w + 2 * rate_w + 13);
    let columns = [
        Column::left("Reaction", reaction_w),
        Column::left("Origin", origin_w),
        Column::right("k1", rate_w),
        Column::right("k2", rate_w),
    ];

    let body: Vec<Vec<String>> = reactions
        .iter()
        .map(|rxn| {
            let origin = if system.spurious_condensed_reactions().contains(*rxn) {
                "spurious"
            } else {
                "known"
            };
            let (k1, k2) = match system.statistics().reactions.get(*rxn) {
                Some(stats) => (sci(stats.k1), sci(stats.k2)),
                None => ("-".to_string(), "-".to_string()),
            };
            vec![rxn.to_string(), origin.to_string(), k1, k2]
        })
        .collect();

    print_table(
        &mut io::stderr().lock(),
        &format!("Condensed Reactions ({})", reactions.len()),
        &columns,
        &body,
    );
}

pub fn print_resting_sets(system: &System, resting_sets: &[&RestingSet]) {
    let name_w = 12usize;
    let origin_w = 8usize;
    let prob_w = 9usize;
    let complexes_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + origin_w + prob_w + 13);
    let columns = [
        Column::left("Name", name_w),
        Column::left("Origin", origin_w),
        Column::left("Complexes", complexes_w),
        Column::right("Prob", prob_w),
    ];

    let body: Vec<Vec<String>> = resting_sets
        .iter()
        .map(|rs| {
            let origin = if system.spurious_resting_sets().contains(*rs) {
                "spurious"
            } else {
                "known"
            };
            let complexes = rs
                .complexes()
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let prob = system
                .statistics()
                .resting_sets
                .get(*rs)
                .map(|stats| format!("{:.4}", stats.conformation_probability()))
                .unwrap_or_else(|| "-".to_string());
            vec![rs.name.clone(), origin.to_string(), complexes, prob]
        })
        .collect();

    print_table(
        &mut io::stderr().lock(),
        &format!("Resting Sets ({})", resting_sets.len()),
        &columns,
        &body,
    );
}

pub fn print_complexes(complexes: &[&Complex]) {
    let name_w = 12usize;
    let strands_w = 18usize;
    let structure_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + strands_w + 10);
    let columns = [
        Column::left("Name", name_w),
        Column::left("Strands", strands_w),
        Column::left("Structure", structure_w),
    ];

    let body: Vec<Vec<String>> = complexes
        .iter()
        .map(|c| vec![c.name.clone(), c.strands.join(" + "), c.structure.clone()])
        .collect();

    print_table(
        &mut io::stderr().lock(),
        &format!("Complexes ({})", complexes.len()),
        &columns,
        &body,
    );
}

fn print_table(out: &mut impl Write, title: &str, columns: &[Column], rows: &[Vec<String>]) {
    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = columns.iter().map(|c| "─".repeat(c.width + 2)).collect();
        format!("{INDENT}{left}{}{right}", segments.join(mid))
    };
    let line = |cells: &[String]| {
        let rendered: Vec<String> = columns
            .iter()
            .zip(cells)
            .map(|(column, cell)| {
                let cell = truncate(cell, column.width);
                match column.align {
                    Align::Left => format!(" {:<w$} ", cell, w = column.width),
                    Align::Right => format!(" {:>w$} ", cell, w = column.width),
                }
            })
            .collect();
        format!("{INDENT}│{}│", rendered.join("│"))
    };

    let header: Vec<String> = columns.iter().map(|c| c.title.to_string()).collect();

    let _ = writeln!(
        out,
        "{INDENT}┌─ {} ─┐",
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(out, "{}", line(&header));
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));
    if rows.is_empty() {
        let mut empty = vec![String::new(); columns.len()];
        if let Some(first) = empty.first_mut() {
            *first = "(none)".to_string();
        }
        let _ = writeln!(out, "{}", line(&empty));
    }
    for row in rows {
        let _ = writeln!(out, "{}", line(row));
    }
    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}
