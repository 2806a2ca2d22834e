use crate::query_state::QueryState;
use crate::sanitizer::escape_text;

pub const SUBMIT_LABEL: &str = "Check Claim";
pub const LOADING_LABEL: &str = "Loading...";
pub const NO_RESULTS_MESSAGE: &str = "No fact-checks found for this claim.";

/// Renders the whole page for the current session. Every piece of text that
/// came from the user or the remote API goes through `escape_text`.
pub fn render_page(state: &QueryState) -> String {
    let mut body = String::new();

    body.push_str(&render_form(state));

    if !state.query().is_empty() {
        body.push_str(&format!(
            "<div id=\"user-query\" class=\"status\">Your query: &quot;{}&quot;</div>\n",
            escape_text(state.query())
        ));
    }

    if let Some(error) = state.error() {
        body.push_str(&format!(
            "<div id=\"error-msg\" class=\"error\" role=\"alert\">{}</div>\n",
            escape_text(error)
        ));
    }

    if state.shows_no_results() {
        body.push_str(&format!(
            "<div id=\"no-results-msg\" class=\"no-results\">{NO_RESULTS_MESSAGE}</div>\n"
        ));
    }

    body.push_str("<div id=\"results\">");
    body.push_str(&state.results().to_html());
    body.push_str("</div>\n");

    if state.shows_page_number() {
        body.push_str(&format!(
            "<div id=\"pagination-info\">Page <span id=\"current-page\">{}</span></div>\n",
            state.page()
        ));
    }

    if state.can_load_more() {
        body.push_str(
            "<form method=\"post\" action=\"/more\"><button id=\"load-more-btn\" type=\"submit\">Load more</button></form>\n",
        );
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>factz - claim checker</title>\n\
<link rel=\"stylesheet\" href=\"/static/app.css\">\n</head>\n<body>\n<main>\n\
<h1>Fact check a claim</h1>\n{body}</main>\n</body>\n</html>\n"
    )
}

fn render_form(state: &QueryState) -> String {
    let (disabled, label) = if state.is_in_flight() {
        (" disabled", LOADING_LABEL)
    } else {
        ("", SUBMIT_LABEL)
    };
    format!(
        "<form id=\"factcheck-form\" method=\"post\" action=\"/search\">\n\
<input id=\"query\" name=\"query\" type=\"text\" value=\"{}\" placeholder=\"Enter a claim\" autofocus>\n\
<button id=\"submit-btn\" type=\"submit\"{disabled}><span id=\"check-btn-label\">{label}</span></button>\n\
<button id=\"clear-btn\" type=\"submit\" formaction=\"/clear\">Clear</button>\n\
</form>\n",
        escape_text(state.query())
    )
}
