//! Record page rendering
//!
//! Endpoints:
//! - page_records: Main page; the table loads itself from the URL's view state
//!
//! Helper functions:
//! - render_table: Filter form, sortable table and page selector for one view

use crate::AppState;
use axum::extract::Query;
use editweb_core::{PaginationModel, SortDirection, SortKey, ViewModel, ViewState};
use editweb_utils::{escape_html, format_number};

const TARGET: &str = "#records-content";

/// Records page - header, statistics and a table container that loads on sight
pub async fn page_records(
    state: axum::extract::State<AppState>,
    params: Query<Vec<(String, String)>>,
) -> axum::response::Html<String> {
    let store = state.store.read().await;
    let stats = store.stats();
    let view_state = ViewState::from_query_pairs(params.0.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>Transaction Edits</h2>
            <button onclick='reloadRecords()' class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200' title='Reload records'>Reload</button>
        </div>
        <div class='grid grid-cols-2 md:grid-cols-4 gap-3 mb-4'>
            <div class='bg-indigo-50 p-3 rounded-lg border border-indigo-100'><p class='text-xs text-indigo-600'>Records</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-purple-50 p-3 rounded-lg border border-purple-100'><p class='text-xs text-purple-600'>Editors</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-green-50 p-3 rounded-lg border border-green-100'><p class='text-xs text-green-600'>From</p><p class='text-sm font-medium truncate'>{}</p></div>
            <div class='bg-orange-50 p-3 rounded-lg border border-orange-100'><p class='text-xs text-orange-600'>To</p><p class='text-sm font-medium truncate'>{}</p></div>
        </div>
        <div id='records-content' hx-get='/records/table{}' hx-trigger='load' class='bg-white rounded-xl shadow-sm p-6'>
            <p class='text-gray-500 text-center'>Loading...</p>
        </div>
        <script>
        function reloadRecords() {{
            fetch('/api/reload', {{method: 'POST'}})
                .then(r => r.json())
                .then(data => {{
                    if (data.success) {{
                        window.location.reload();
                    }} else {{
                        alert('Reload failed: ' + data.message);
                    }}
                }})
                .catch(e => alert('Reload failed: ' + e));
        }}
        </script>"#,
        format_number(stats.total_records),
        format_number(stats.distinct_names),
        escape_html(stats.date_range_start.as_deref().unwrap_or("-")),
        escape_html(stats.date_range_end.as_deref().unwrap_or("-")),
        escape_html(&view_state.to_query_string()),
    );

    axum::response::Html(crate::base_html("Transaction Edits", &inner_content))
}

/// Render the swappable part of the page for one view
pub fn render_table(view: &ViewModel) -> String {
    let state = view.state();
    let location = escape_html(view.location());

    let mut html = render_filter_form(state, &location, view.filtered_count());

    html.push_str("<table class='min-w-full text-sm'><thead><tr class='text-left text-gray-600'>");
    for key in SortKey::ALL {
        let marker = if key == state.sort_key {
            match state.sort_direction {
                SortDirection::Ascending => " ▲",
                SortDirection::Descending => " ▼",
            }
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<th class='px-3 py-2'><button class='font-semibold hover:text-indigo-600' hx-get='/records/sort/{}{}' hx-target='{}'>{}{}</button></th>"#,
            key,
            location,
            TARGET,
            column_label(key),
            marker
        ));
    }
    html.push_str("<th class='px-3 py-2'>Field</th><th class='px-3 py-2'>Old Value</th><th class='px-3 py-2'>New Value</th></tr></thead><tbody>");

    let rows = view.visible_page();
    if rows.is_empty() {
        html.push_str("<tr><td colspan='6' class='text-center py-12 text-gray-500'>No records</td></tr>");
    }
    for record in rows {
        html.push_str(&format!(
            "<tr class='record-row border-t hover:bg-gray-50'><td class='px-3 py-2 whitespace-nowrap'>{}</td><td class='px-3 py-2'>{}</td><td class='px-3 py-2'>{}</td><td class='px-3 py-2'>{}</td><td class='px-3 py-2 text-red-600'>{}</td><td class='px-3 py-2 text-green-600'>{}</td></tr>",
            escape_html(&record.date),
            escape_html(&record.name),
            escape_html(&record.title),
            escape_html(&record.field),
            escape_html(&record.old_value),
            escape_html(&record.new_value),
        ));
    }
    html.push_str("</tbody></table>");

    html.push_str(&render_pagination(&view.pagination_model(), &location));
    html
}

fn column_label(key: SortKey) -> &'static str {
    match key {
        SortKey::Date => "Date",
        SortKey::Name => "Name",
        SortKey::Title => "Title",
    }
}

fn render_filter_form(state: &ViewState, location: &str, matching: usize) -> String {
    let selected = |direction: SortDirection| if state.sort_direction == direction { "selected" } else { "" };

    format!(
        r#"<form hx-get='/records/filter' hx-target='{target}' class='flex flex-wrap items-end gap-3 mb-4'>
            <input type='hidden' name='sort' value='{sort}'>
            <input type='hidden' name='dir' value='{dir}'>
            <label class='text-sm text-gray-600'>Name<input type='text' name='name' value='{name}' class='block px-3 py-2 border rounded-lg w-48'></label>
            <label class='text-sm text-gray-600'>Date<input type='text' name='date' value='{date}' placeholder='YYYY-MM-DD' class='block px-3 py-2 border rounded-lg w-36'></label>
            <label class='text-sm text-gray-600'>Title<input type='text' name='title' value='{title}' class='block px-3 py-2 border rounded-lg w-48'></label>
            <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Apply</button>
            <button type='button' hx-get='/records/reset' hx-target='{target}' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Show all</button>
            <label class='text-sm text-gray-600'>Direction
                <select name='value' hx-get='/records/direction{location}' hx-target='{target}' hx-trigger='change' class='block px-3 py-2 border rounded-lg'>
                    <option value='asc' {asc}>Ascending</option>
                    <option value='desc' {desc}>Descending</option>
                </select>
            </label>
            <span class='ml-auto text-sm text-gray-500'>{matching} matching records</span>
        </form>"#,
        target = TARGET,
        sort = state.sort_key,
        dir = state.sort_direction.multiplier(),
        name = escape_html(&state.filters.name),
        date = escape_html(&state.filters.date),
        title = escape_html(&state.filters.title),
        location = location,
        asc = selected(SortDirection::Ascending),
        desc = selected(SortDirection::Descending),
        matching = format_number(matching),
    )
}

/// Previous and Next stay clickable everywhere; the server ignores them at the edges
fn render_pagination(model: &PaginationModel, location: &str) -> String {
    let mut html = String::from("<div class='mt-6 flex items-center flex-wrap gap-2'>");

    html.push_str(&format!(
        r#"<button hx-get='/records/prev{}' hx-target='{}' class='px-4 py-2 rounded bg-blue-500 text-white'>Previous</button>"#,
        location, TARGET
    ));

    for button in &model.buttons {
        match button.page {
            Some(page) if !button.is_ellipsis => {
                let class = if button.is_current {
                    "px-4 py-2 rounded bg-blue-500 text-white"
                } else {
                    "px-4 py-2 rounded border hover:bg-blue-500 hover:text-white"
                };
                html.push_str(&format!(
                    r#"<button hx-get='/records/page/{}{}' hx-target='{}' class='{}'>{}</button>"#,
                    page, location, TARGET, class, button.label
                ));
            }
            _ => html.push_str(&format!("<span class='px-2 text-gray-500'>{}</span>", button.label)),
        }
    }

    html.push_str(&format!(
        r#"<button hx-get='/records/next{}' hx-target='{}' class='px-4 py-2 rounded bg-blue-500 text-white'>Next</button>"#,
        location, TARGET
    ));

    html.push_str(&format!(
        "<span class='ml-auto text-sm text-gray-500'>Page {} / {}</span></div>",
        model.current_page, model.total_pages
    ));
    html
}
