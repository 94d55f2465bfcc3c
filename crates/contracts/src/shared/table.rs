//! Column definitions for the generic data table.

/// Placeholder shown for missing values
pub const EMPTY_CELL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Left => "cell--left",
            Self::Center => "cell--center",
            Self::Right => "cell--right",
        }
    }
}

/// One table column: header label, cell renderer and optional filter key.
pub struct ColumnDef<R> {
    pub key: &'static str,
    pub label: &'static str,
    pub align: Align,
    pub render: fn(&R) -> Option<String>,
    /// Key of the filter binding shown in the column header
    pub filter: Option<&'static str>,
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ColumnDef<R> {}

impl<R> std::fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("align", &self.align)
            .field("filter", &self.filter)
            .finish()
    }
}

impl<R> ColumnDef<R> {
    pub const fn new(key: &'static str, label: &'static str, render: fn(&R) -> Option<String>) -> Self {
        Self {
            key,
            label,
            align: Align::Left,
            render,
            filter: None,
        }
    }

    pub const fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub const fn center(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub const fn filtered_by(mut self, key: &'static str) -> Self {
        self.filter = Some(key);
        self
    }

    /// Cell text; `None` and blank output become [`EMPTY_CELL`]
    pub fn display(&self, row: &R) -> String {
        match (self.render)(row) {
            Some(text) if !text.trim().is_empty() => text,
            _ => EMPTY_CELL.to_string(),
        }
    }
}

/// Formats a money amount with two decimals and thousands separators
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// Shortens an ISO timestamp `2024-03-01T10:15:00Z` to `2024-03-01 10:15`
pub fn format_datetime(value: &str) -> String {
    let value = value.trim();
    match value.split_once('T') {
        Some((date, time)) => {
            let hm: String = time.chars().take(5).collect();
            format!("{} {}", date, hm)
        }
        None => value.to_string(),
    }
}
