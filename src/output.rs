use serde::Serialize;
use std::error::Error;
use tabled::{settings::Style, Table, Tabled};

/// Render a value as a JavaScript constant (`const <name> = <json>;`) so
/// the dashboard can include it with a plain script tag.
///
/// The JSON body is pretty-printed with 2-space indentation. The file is
/// written in one shot and overwritten on every run.
pub fn write_js<T: Serialize>(path: &str, name: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let body = serde_json::to_string_pretty(value)?;
    std::fs::write(path, format!("const {} = {};", name, body))?;
    Ok(())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}
