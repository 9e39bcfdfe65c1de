//! Column definitions and the engine-local sort state.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use crate::table::query::QueryPatch;

type Accessor<T, V> = Box<dyn Fn(&T) -> V + Send + Sync>;

/// Value a column extracts from a row. Drives sorting and row matching.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Integer(i64),
    Decimal(f64),
    Flag(bool),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Flag(_) => 1,
            CellValue::Integer(_) | CellValue::Decimal(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Integer(value) => Some(*value as f64),
            CellValue::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    /// Total order used by column sorting. Empty cells sort first, numbers
    /// compare numerically and text case-insensitively.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Text(left), CellValue::Text(right)) => left
                .to_lowercase()
                .cmp(&right.to_lowercase())
                .then_with(|| left.cmp(right)),
            (CellValue::Flag(left), CellValue::Flag(right)) => left.cmp(right),
            _ => match (self.as_number(), other.as_number()) {
                (Some(left), Some(right)) => left.total_cmp(&right),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }

    /// Case-insensitive substring match. `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        match self {
            CellValue::Empty => false,
            other => other.to_string().to_lowercase().contains(needle),
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(value) => write!(f, "{value}"),
            CellValue::Integer(value) => write!(f, "{value}"),
            CellValue::Decimal(value) => write!(f, "{value}"),
            CellValue::Flag(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Decimal(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Flag(value)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// One column of a table over rows of type `T`.
pub struct Column<T> {
    id: String,
    header: String,
    sortable: bool,
    searchable: bool,
    value: Accessor<T, CellValue>,
    display: Option<Accessor<T, String>>,
    tone: Option<Accessor<T, Option<&'static str>>>,
    link: Option<Accessor<T, Option<QueryPatch>>>,
}

impl<T> Column<T> {
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        value: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            sortable: true,
            searchable: true,
            value: Box::new(value),
            display: None,
            tone: None,
            link: None,
        }
    }

    /// Renders the cell differently from its sort/match value.
    pub fn display(mut self, display: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    /// Badge style for the cell, e.g. a status pill.
    pub fn tone(
        mut self,
        tone: impl Fn(&T) -> Option<&'static str> + Send + Sync + 'static,
    ) -> Self {
        self.tone = Some(Box::new(tone));
        self
    }

    /// Turns the cell into a link to the current table state with `link`
    /// applied, e.g. a drill-down into the row's children.
    pub fn link(
        mut self,
        link: impl Fn(&T) -> Option<QueryPatch> + Send + Sync + 'static,
    ) -> Self {
        self.link = Some(Box::new(link));
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Excludes the column from client-side row matching.
    pub fn unsearchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn value_of(&self, row: &T) -> CellValue {
        (self.value)(row)
    }

    pub fn text_of(&self, row: &T) -> String {
        match &self.display {
            Some(display) => display(row),
            None => self.value_of(row).to_string(),
        }
    }

    pub fn tone_of(&self, row: &T) -> Option<&'static str> {
        self.tone.as_ref().and_then(|tone| tone(row))
    }

    pub fn link_of(&self, row: &T) -> Option<QueryPatch> {
        self.link.as_ref().and_then(|link| link(row))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Engine-local sort: one column, one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    /// Parses `<column>.asc` or `<column>.desc`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (column, direction) = raw.rsplit_once('.')?;
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return None,
        };
        if column.is_empty() {
            return None;
        }
        Some(Self {
            column: column.to_string(),
            direction,
        })
    }

    pub fn to_param(&self) -> String {
        format!("{}.{}", self.column, self.direction.as_str())
    }

    /// Header click cycle: unsorted → ascending → descending → unsorted.
    pub fn toggle(current: Option<&SortState>, column: &str) -> Option<SortState> {
        match current {
            Some(sort) if sort.column == column => match sort.direction {
                SortDirection::Asc => Some(SortState {
                    column: column.to_string(),
                    direction: SortDirection::Desc,
                }),
                SortDirection::Desc => None,
            },
            _ => Some(SortState {
                column: column.to_string(),
                direction: SortDirection::Asc,
            }),
        }
    }
}
