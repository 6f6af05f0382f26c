//! Deterministic prompt construction for the insight generator.
//!
//! `build_prompt` is pure template substitution: the same request always
//! yields the same prompt, and nothing here touches the process layer.

use crate::domain::InsightRequest;
use crate::report::format::group_digits;

/// Format a value as display currency: `$1,234.56` (sign inside: `$-1,234.56`).
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_digits(int_part);

    let sign = if value < 0.0 { "-" } else { "" };
    format!("${sign}{grouped}.{frac_part}")
}

/// Build the natural-language analyst prompt for one request.
///
/// The prompt embeds the store/dept/year identifiers and the three formatted
/// statistics, asks for the two labeled sections downstream rendering relies
/// on, and asks the model to paraphrase rather than restate the inputs.
pub fn build_prompt(request: &InsightRequest) -> String {
    let average = format_currency(request.average);
    let maximum = format_currency(request.maximum);
    let minimum = format_currency(request.minimum);

    format!(
        "\
You are a senior retail analyst reviewing weekly store sales data.

Here are the key statistics for **Store {store}, Department {dept}, Year {year}**:
- **Average Weekly Sales:** {average}
- **Maximum Weekly Sales:** {maximum}
- **Minimum Weekly Sales:** {minimum}

Please:
1. Write a short analytical summary describing trends and sales patterns.
2. Include clearly separated sections titled **Key Trends** and **Actionable Insights**.
3. Use Markdown formatting (lists, bullet points) and retain dollar signs for currency.
4. Avoid repeating input values exactly; paraphrase naturally.
",
        store = request.store,
        dept = request.dept,
        year = request.year,
    )
}
