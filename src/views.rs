//! Server-rendered HTML for the login and menu screens.

use std::fmt::Write;

use chrono::{Month, NaiveDate};
use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::constants::{EXPENSE_SUBTYPES, INCOME_SUBTYPES};
use crate::models::{
    entry::DATE_FORMAT, EntryKind, LedgerEntry, MonthTotals, RememberedCredential, Summary,
};

/// Message shown at the top of a page after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex;min-height:100vh}\
nav{background:#1f2937;color:#fff;padding:1.5rem;width:14rem}\
nav a,nav button{display:block;color:#fff;margin:.5rem 0;background:none;border:0;\
font:inherit;cursor:pointer;text-decoration:none;padding:0}\
main{padding:1.5rem 2rem;flex:1}\
.notice{padding:.75rem;border-radius:4px;margin-bottom:1rem}\
.success{background:#dcfce7}.error{background:#fee2e2}\
.metric{display:inline-block;margin-right:2rem}.metric b{display:block;font-size:1.5rem}\
table{border-collapse:collapse}td,th{border:1px solid #ddd;padding:.25rem .5rem}\
label{display:block;margin:.5rem 0}";

/// Escape text for HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// `$1,234.56`, with the sign after the currency symbol (`$-600.00`)
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("${}{}.{}", if negative { "-" } else { "" }, grouped, fraction)
}

pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

fn notice_html(notice: Option<&Notice>) -> String {
    match notice {
        Some(Notice::Success(msg)) => {
            format!(r#"<div class="notice success">{}</div>"#, escape(msg))
        }
        Some(Notice::Error(msg)) => {
            format!(r#"<div class="notice error">{}</div>"#, escape(msg))
        }
        None => String::new(),
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"es\"><head><meta charset=\"utf-8\">\
         <title>{} - Gestor de Cuentas Personales</title><style>{}</style></head>\
         <body>{}</body></html>",
        escape(title),
        STYLE,
        body
    )
}

/// Page with the sidebar menu of the logged-in screen
fn menu_page_shell(username: &str, title: &str, notice: Option<&Notice>, content: &str) -> String {
    let body = format!(
        r#"<nav><h2>Hola, {user}</h2>
<a href="/income">Registrar Ingreso</a>
<a href="/expense">Registrar Gasto</a>
<a href="/summary/monthly">Resumen Mensual</a>
<a href="/summary/annual">Resumen Anual</a>
<a href="/entries">Editar o Eliminar</a>
<a href="/charts">Gráficos</a>
<form method="post" action="/logout"><button type="submit">Cerrar Sesión</button></form>
</nav><main><h1>{title}</h1>{notice}{content}</main>"#,
        user = escape(username),
        title = escape(title),
        notice = notice_html(notice),
        content = content
    );
    page(title, &body)
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        &format!(
            concat!(
                r#"<main>{}<a href="javascript:history.back()">Volver</a> · "#,
                r#"<a href="/">Inicio</a></main>"#
            ),
            notice_html(Some(&Notice::Error(message.to_string())))
        ),
    )
}

// =============================================================================
// Login screen
// =============================================================================

pub fn login_page(prefill: &RememberedCredential, notice: Option<&Notice>) -> String {
    let body = format!(
        r#"<main><h1>Gestor de Cuentas Personales</h1>{notice}
<form method="post" action="/login">
<label>Usuario <input name="username" value="{user}"></label>
<label>Contraseña <input name="password" type="password" value="{pass}"></label>
<label><input name="remember" type="checkbox" checked> Recordarme</label>
<button type="submit">Iniciar sesión</button>
</form>
<p><a href="/register">Registrarte</a></p></main>"#,
        notice = notice_html(notice),
        user = escape(&prefill.username),
        pass = escape(&prefill.password),
    );
    page("Iniciar Sesión", &body)
}

pub fn register_page(notice: Option<&Notice>) -> String {
    let body = format!(
        r#"<main><h1>Registrarte</h1>{notice}
<form method="post" action="/register">
<label>Nuevo nombre de usuario <input name="username"></label>
<label>Nueva contraseña <input name="password" type="password"></label>
<button type="submit">Registrarse</button>
</form>
<p><a href="/">Iniciar Sesión</a></p></main>"#,
        notice = notice_html(notice),
    );
    page("Registrarte", &body)
}

// =============================================================================
// Menu screen
// =============================================================================

pub fn menu_page(username: &str) -> String {
    menu_page_shell(
        username,
        "Gestor de Cuentas Personales",
        None,
        "<p>Elegí una opción del menú.</p>",
    )
}

fn subtype_options(subtypes: &[&str]) -> String {
    subtypes
        .iter()
        .map(|s| format!("<option>{}</option>", escape(s)))
        .collect()
}

pub fn income_page(username: &str, today: NaiveDate, notice: Option<&Notice>) -> String {
    let content = format!(
        r#"<form method="post" action="/income">
<label>Fecha <input name="date" type="date" value="{today}"></label>
<label>Monto <input name="amount" type="number" min="0" step="0.01" value="0.00"></label>
<label>Tipo de ingreso <select name="subtype">{options}</select></label>
<label>Referencia <input name="reference"></label>
<button type="submit">Guardar Ingreso</button>
</form>"#,
        today = today.format(DATE_FORMAT),
        options = subtype_options(&INCOME_SUBTYPES),
    );
    menu_page_shell(username, "Registrar un ingreso", notice, &content)
}

pub fn expense_page(username: &str, today: NaiveDate, notice: Option<&Notice>) -> String {
    let content = format!(
        r#"<form method="post" action="/expense">
<label>Fecha <input name="date" type="date" value="{today}"></label>
<label>Monto <input name="amount" type="number" min="0" step="0.01" value="0.00"></label>
<label><input name="foreign" type="checkbox"> ¿El gasto es en dólares?</label>
<label>Tipo de gasto <select name="subtype">{options}</select></label>
<label>¿En cuántas cuotas?
<input name="installments" type="number" min="1" step="1" value="1"></label>
<label>Referencia <input name="reference"></label>
<button type="submit">Guardar Gasto</button>
</form>"#,
        today = today.format(DATE_FORMAT),
        options = subtype_options(&EXPENSE_SUBTYPES),
    );
    menu_page_shell(username, "Registrar un gasto", notice, &content)
}

fn entries_table(rows: &[(usize, &LedgerEntry)]) -> String {
    let mut html = String::from(
        "<table><tr><th>#</th><th>tipo</th><th>subtipo</th><th>fecha</th><th>monto</th>\
         <th>referencia</th><th>cuotas</th><th>dolares</th></tr>",
    );
    for (index, entry) in rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            index,
            entry.kind.label(),
            escape(&entry.subtype),
            escape(&entry.date),
            format_money(entry.amount),
            escape(&entry.reference),
            entry.installments,
            if entry.foreign_currency { "Sí" } else { "No" },
        );
    }
    html.push_str("</table>");
    html
}

fn summary_metrics(summary: &Summary) -> String {
    format!(
        r#"<div class="metric">Total de ingresos<b>{}</b></div>
<div class="metric">Total de gastos<b>{}</b></div>
<div class="metric">Balance<b>{}</b></div>"#,
        format_money(summary.total_income),
        format_money(summary.total_expense),
        format_money(summary.balance),
    )
}

pub fn monthly_summary_page(
    username: &str,
    month: u32,
    year: i32,
    summary: &Summary,
    rows: &[(usize, &LedgerEntry)],
) -> String {
    let months: String = (1..=12)
        .map(|m| {
            let marker = if m == month { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, m, marker, month_name(m))
        })
        .collect();

    let content = format!(
        r#"<form method="get" action="/summary/monthly">
<label>Mes <select name="month">{months}</select></label>
<label>Año <input name="year" type="number" step="1" value="{year}"></label>
<button type="submit">Ver</button></form>
{metrics}<h2>Detalle</h2>{table}"#,
        metrics = summary_metrics(summary),
        table = entries_table(rows),
    );
    menu_page_shell(username, "Resumen Mensual", None, &content)
}

pub fn annual_summary_page(
    username: &str,
    year: i32,
    summary: &Summary,
    rows: &[(usize, &LedgerEntry)],
) -> String {
    let content = format!(
        r#"<form method="get" action="/summary/annual">
<label>Año <input name="year" type="number" step="1" value="{year}"></label>
<button type="submit">Ver</button></form>
{metrics}<h2>Detalle</h2>{table}"#,
        metrics = summary_metrics(summary),
        table = entries_table(rows),
    );
    menu_page_shell(username, "Resumen Anual", None, &content)
}

fn edit_form(index: usize, entry: &LedgerEntry) -> String {
    let kinds: String = [EntryKind::Income, EntryKind::Expense]
        .iter()
        .map(|k| {
            let marker = if *k == entry.kind { " selected" } else { "" };
            format!("<option{}>{}</option>", marker, k.label())
        })
        .collect();
    let date = entry
        .parsed_date()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default();

    format!(
        r#"<h2>Registro {index}</h2>
<form method="post" action="/entries/{index}">
<label>Tipo <select name="kind">{kinds}</select></label>
<label>Subtipo <input name="subtype" value="{subtype}"></label>
<label>Fecha <input name="date" type="date" value="{date}"></label>
<label>Monto <input name="amount" type="number" step="0.01" value="{amount}"></label>
<label>Referencia <input name="reference" value="{reference}"></label>
<label>Cuotas <input name="installments" type="number" min="1" value="{installments}"></label>
<label><input name="foreign" type="checkbox"{foreign}> ¿En dólares?</label>
<button type="submit">Guardar cambios</button>
</form>
<form method="post" action="/entries/{index}/delete">
<button type="submit">Eliminar registro</button>
</form>"#,
        subtype = escape(&entry.subtype),
        amount = entry.amount,
        reference = escape(&entry.reference),
        installments = entry.installments,
        foreign = if entry.foreign_currency { " checked" } else { "" },
    )
}

pub fn entries_page(
    username: &str,
    entries: &[LedgerEntry],
    selected: Option<usize>,
    notice: Option<&Notice>,
) -> String {
    let content = if entries.is_empty() {
        "<p>No hay registros.</p>".to_string()
    } else {
        let rows: Vec<(usize, &LedgerEntry)> = entries.iter().enumerate().collect();
        let editor = selected
            .and_then(|i| entries.get(i).map(|entry| edit_form(i, entry)))
            .unwrap_or_default();
        format!(
            r#"{table}
<form method="get" action="/entries">
<label>Índice del registro a modificar o eliminar
<input name="index" type="number" min="0" max="{max}" step="1" value="{current}"></label>
<button type="submit">Seleccionar</button></form>{editor}"#,
            table = entries_table(&rows),
            max = entries.len() - 1,
            current = selected.unwrap_or(0),
        )
    };
    menu_page_shell(username, "Editar o Eliminar Registros", notice, &content)
}

// =============================================================================
// Charts
// =============================================================================

fn to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// Grouped income/expense bars, one group per month
fn monthly_chart(months: &[MonthTotals; 12]) -> String {
    const HEIGHT: f64 = 200.0;
    const GROUP: f64 = 50.0;

    let max = months
        .iter()
        .flat_map(|m| [to_f64(m.income), to_f64(m.expense)])
        .fold(0.0_f64, f64::max);
    let scale = if max > 0.0 { HEIGHT / max } else { 0.0 };

    let mut svg = format!(
        r#"<svg width="{}" height="{}" role="img" aria-label="Ingresos y gastos por mes">"#,
        GROUP * 12.0,
        HEIGHT + 20.0
    );
    for (i, totals) in months.iter().enumerate() {
        let x = i as f64 * GROUP;
        let income = to_f64(totals.income) * scale;
        let expense = to_f64(totals.expense) * scale;
        let _ = write!(
            svg,
            concat!(
                r##"<rect x="{:.1}" y="{:.1}" width="18" height="{:.1}" fill="#16a34a">"##,
                "<title>Ingresos {}</title></rect>"
            ),
            x + 5.0,
            HEIGHT - income,
            income,
            format_money(totals.income)
        );
        let _ = write!(
            svg,
            concat!(
                r##"<rect x="{:.1}" y="{:.1}" width="18" height="{:.1}" fill="#dc2626">"##,
                "<title>Gastos {}</title></rect>"
            ),
            x + 24.0,
            HEIGHT - expense,
            expense,
            format_money(totals.expense)
        );
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="10">{}</text>"#,
            x + 5.0,
            HEIGHT + 14.0,
            &month_name(i as u32 + 1)[..3]
        );
    }
    svg.push_str("</svg>");
    svg
}

/// Horizontal bars of expense per subtype
fn subtype_chart(totals: &[(String, Decimal)]) -> String {
    const WIDTH: f64 = 400.0;
    const ROW: f64 = 24.0;

    if totals.is_empty() {
        return "<p>Sin gastos en el período.</p>".to_string();
    }

    let max = totals
        .iter()
        .map(|(_, amount)| to_f64(*amount))
        .fold(0.0_f64, f64::max);
    let scale = if max > 0.0 { WIDTH / max } else { 0.0 };

    let mut svg = format!(
        r#"<svg width="{}" height="{}" role="img" aria-label="Gastos por tipo">"#,
        WIDTH + 320.0,
        ROW * totals.len() as f64
    );
    for (i, (subtype, amount)) in totals.iter().enumerate() {
        let y = i as f64 * ROW;
        let _ = write!(
            svg,
            concat!(
                r#"<text x="0" y="{:.1}" font-size="12">{}</text>"#,
                r##"<rect x="160" y="{:.1}" width="{:.1}" height="16" fill="#dc2626"/>"##,
                r#"<text x="{:.1}" y="{:.1}" font-size="12">{}</text>"#
            ),
            y + 13.0,
            escape(subtype),
            y + 2.0,
            to_f64(*amount) * scale,
            170.0 + to_f64(*amount) * scale,
            y + 13.0,
            format_money(*amount)
        );
    }
    svg.push_str("</svg>");
    svg
}

pub fn charts_page(
    username: &str,
    year: i32,
    months: &[MonthTotals; 12],
    by_subtype: &[(String, Decimal)],
) -> String {
    let content = format!(
        r#"<form method="get" action="/charts">
<label>Año <input name="year" type="number" step="1" value="{year}"></label>
<button type="submit">Ver</button></form>
<h2>Ingresos y gastos por mes</h2>{monthly}
<h2>Gastos por tipo</h2>{subtypes}"#,
        monthly = monthly_chart(months),
        subtypes = subtype_chart(by_subtype),
    );
    menu_page_shell(username, "Gráficos", None, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("Débito Automático"), "Débito Automático");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(0, 0)), "$0.00");
        assert_eq!(format_money(Decimal::new(600, 0)), "$600.00");
        assert_eq!(format_money(Decimal::new(123456789, 2)), "$1,234,567.89");
        assert_eq!(format_money(Decimal::new(-600, 0)), "$-600.00");
        assert_eq!(format_money(Decimal::new(100000, 0)), "$100,000.00");
        assert_eq!(format_money(Decimal::new(12346, 3)), "$12.35");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "");
    }

    #[test]
    fn test_login_page_prefill_is_escaped() {
        let prefill = RememberedCredential {
            username: "ana\"><script>".to_string(),
            password: "secreto".to_string(),
        };
        let html = login_page(&prefill, None);

        assert!(html.contains("value=\"ana&quot;&gt;&lt;script&gt;\""));
        assert!(html.contains("value=\"secreto\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_entries_page_empty() {
        let html = entries_page("ana", &[], None, None);
        assert!(html.contains("No hay registros."));
    }

    #[test]
    fn test_subtype_chart_empty() {
        assert!(subtype_chart(&[]).contains("Sin gastos"));
    }
}
