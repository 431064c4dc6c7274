use crate::chart::{build_chart, render_svg};
use crate::form::{FieldDomain, AGE, CALORIES, HEIGHT, STEPS, WEIGHT};
use crate::models::{Entry, EntryLog, Gender, MonthlyAverage, YearlyAverage};
use crate::stats::summarize;
use chrono::NaiveDate;

pub const EMPTY_PLACEHOLDER: &str = "No data added yet. Enter your details above.";
pub const ADDED_MESSAGE: &str = "Entry added!";

const ENTRY_HEADERS: [&str; 8] = [
    "#", "Date", "Height", "Age", "Gender", "Weight", "Calories", "Steps",
];
const AVERAGE_HEADERS: [&str; 4] = ["Entries", "Weight", "Calories", "Steps"];

pub struct PageView<'a> {
    pub today: NaiveDate,
    pub log: &'a EntryLog,
    pub added: bool,
}

pub fn render_index(view: &PageView<'_>) -> String {
    let flash = if view.added {
        format!(r#"<div class="status" data-type="ok" id="status">{ADDED_MESSAGE}</div>"#)
    } else {
        String::new()
    };

    INDEX_HTML
        .replace("{{FORM}}", &render_form(view.today, view.log.latest()))
        .replace("{{FLASH}}", &flash)
        .replace("{{TABLE}}", &render_entries_table(view.log))
        .replace("{{ANALYSIS}}", &render_analysis(view.log))
}

/// Numeric fields and gender start from the last entry so repeated logging
/// only needs the values that changed. The date always starts at today.
fn render_form(today: NaiveDate, latest: Option<&Entry>) -> String {
    let field = |domain: &FieldDomain, current: Option<f64>| {
        format!(
            r#"<label class="field"><span class="label">{label}</span><input type="number" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}" /></label>"#,
            label = domain.label,
            name = domain.name,
            min = domain.min,
            max = domain.max,
            step = domain.step(),
            value = current.unwrap_or(domain.default),
        )
    };

    let selected = latest.map(|entry| entry.gender).unwrap_or_default();
    let options: String = Gender::ALL
        .iter()
        .map(|gender| {
            let marker = if *gender == selected { " selected" } else { "" };
            format!(r#"<option value="{gender}"{marker}>{gender}</option>"#)
        })
        .collect();

    [
        format!(
            r#"<label class="field"><span class="label">Date</span><input type="date" name="date" value="{today}" /></label>"#
        ),
        field(&HEIGHT, latest.map(|e| e.height_cm)),
        field(&AGE, latest.map(|e| f64::from(e.age_years))),
        format!(
            r#"<label class="field"><span class="label">Gender</span><select name="gender">{options}</select></label>"#
        ),
        field(&WEIGHT, latest.map(|e| e.weight_kg)),
        field(&CALORIES, latest.map(|e| f64::from(e.calories))),
        field(&STEPS, latest.map(|e| f64::from(e.steps))),
    ]
    .concat()
}

fn render_entries_table(log: &EntryLog) -> String {
    let rows: Vec<String> = log
        .chronological()
        .into_iter()
        .map(|(position, entry)| entry_row(position, entry))
        .collect();
    table("entries", &ENTRY_HEADERS, &rows)
}

fn render_analysis(log: &EntryLog) -> String {
    let (Some(summary), Some(chart)) = (summarize(log), build_chart(log)) else {
        return format!(r#"<p class="info" id="placeholder">{EMPTY_PLACEHOLDER}</p>"#);
    };

    let latest_position = log.len();
    let monthly: Vec<String> = summary.monthly_averages.iter().map(monthly_row).collect();
    let yearly: Vec<String> = summary.yearly_averages.iter().map(yearly_row).collect();

    format!(
        r#"<h3>Latest Entry</h3>{}<h3>Monthly Averages</h3>{}<h3>Yearly Averages</h3>{}<h3>Progress Over Time</h3><div class="chart-card">{}</div>"#,
        table("latest", &ENTRY_HEADERS, &[entry_row(latest_position, &summary.latest)]),
        table("monthly", &with_key("Month"), &monthly),
        table("yearly", &with_key("Year"), &yearly),
        render_svg(&chart),
    )
}

fn with_key(key: &'static str) -> Vec<&'static str> {
    std::iter::once(key).chain(AVERAGE_HEADERS).collect()
}

fn entry_row(position: usize, entry: &Entry) -> String {
    cells(&[
        position.to_string(),
        entry.date.to_string(),
        entry.height_cm.to_string(),
        entry.age_years.to_string(),
        entry.gender.to_string(),
        entry.weight_kg.to_string(),
        entry.calories.to_string(),
        entry.steps.to_string(),
    ])
}

fn monthly_row(month: &MonthlyAverage) -> String {
    cells(&[
        month.month.clone(),
        month.entries.to_string(),
        format!("{:.2}", month.avg_weight_kg),
        format!("{:.2}", month.avg_calories),
        format!("{:.2}", month.avg_steps),
    ])
}

fn yearly_row(year: &YearlyAverage) -> String {
    cells(&[
        year.year.to_string(),
        year.entries.to_string(),
        format!("{:.2}", year.avg_weight_kg),
        format!("{:.2}", year.avg_calories),
        format!("{:.2}", year.avg_steps),
    ])
}

fn cells(values: &[String]) -> String {
    let cells: String = values.iter().map(|value| format!("<td>{value}</td>")).collect();
    format!("<tr>{cells}</tr>")
}

fn table(id: &str, headers: &[&str], rows: &[String]) -> String {
    let head: String = headers.iter().map(|h| format!("<th>{h}</th>")).collect();
    format!(
        r#"<table id="{id}"><thead><tr>{head}</tr></thead><tbody>{}</tbody></table>"#,
        rows.concat()
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fitness Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef4ec;
      --bg-2: #bfe0c9;
      --ink: #2b2a28;
      --accent: #2d7a4b;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3f1e6 60%, #f4f8f2 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.4rem;
    }

    h3 {
      margin: 20px 0 8px;
      font-size: 1.05rem;
      color: var(--accent-2);
    }

    form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
      align-items: end;
    }

    .field {
      display: grid;
      gap: 6px;
    }

    .field .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    input,
    select {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      background: white;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(45, 122, 75, 0.3);
    }

    button:active {
      transform: scale(0.98);
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: white;
      border-radius: 14px;
      overflow: hidden;
      font-size: 0.92rem;
    }

    th,
    td {
      padding: 8px 10px;
      text-align: right;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    th {
      background: rgba(47, 72, 88, 0.06);
      font-weight: 600;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .chart {
      width: 100%;
      height: auto;
      display: block;
    }

    .status {
      font-size: 0.95rem;
      padding: 12px 16px;
      border-radius: 12px;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
      background: rgba(45, 122, 75, 0.1);
    }

    .info {
      margin: 0;
      padding: 12px 16px;
      border-radius: 12px;
      color: #2f4858;
      background: rgba(47, 72, 88, 0.08);
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Fitness Tracker</h1>
    </header>

    <section>
      <h2>Enter Your Details</h2>
      <form id="entry-form" method="post" action="/entries" novalidate>
        {{FORM}}
        <button type="submit">Add to List</button>
      </form>
    </section>

    {{FLASH}}

    <section>
      <h2>Your Data</h2>
      {{TABLE}}
    </section>

    <section>
      <h2>Analysis</h2>
      {{ANALYSIS}}
    </section>
  </main>
</body>
</html>
"#;
