use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    /// Parent document number, natural order
    Document,
    /// Attached file byte size
    Size,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Document => "document",
            SortColumn::Size => "size",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(column: SortColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: SortColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }
}

/// Next sort after a click on `clicked`.
///
/// Same column cycles unsorted -> asc -> desc -> unsorted; another column
/// starts at asc.
pub fn next_sort(current: Option<SortSpec>, clicked: SortColumn) -> Option<SortSpec> {
    match current {
        Some(spec) if spec.column == clicked => match spec.direction {
            SortDirection::Asc => Some(SortSpec::desc(clicked)),
            SortDirection::Desc => None,
        },
        _ => Some(SortSpec::asc(clicked)),
    }
}

/// Header indicator for `column` under the current sort.
pub fn sort_indicator(current: Option<SortSpec>, column: SortColumn) -> &'static str {
    match current {
        Some(spec) if spec.column == column => match spec.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        },
        _ => " ⇅",
    }
}

/// Natural string order: digit runs compare by value, the rest
/// case-insensitively with Latin diacritics folded, so "DOC-2" < "DOC-10"
/// and "École" < "Zeep". Not a full locale collation: ligatures and
/// non-Latin scripts fall back to code point order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ord = cmp_digit_runs(&l_run, &r_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = fold_char(l).cmp(&fold_char(r));
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }

    // Equal ignoring case: fall back to a plain comparison for a total order
    a.cmp(b)
}

/// Lowercase base letter for common accented Latin characters.
fn fold_char(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ł' | 'ľ' | 'ĺ' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ŕ' | 'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        // "02" after "2"
        .then_with(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_state_cycle() {
        let s1 = next_sort(None, SortColumn::Size);
        assert_eq!(s1, Some(SortSpec::asc(SortColumn::Size)));
        let s2 = next_sort(s1, SortColumn::Size);
        assert_eq!(s2, Some(SortSpec::desc(SortColumn::Size)));
        let s3 = next_sort(s2, SortColumn::Size);
        assert_eq!(s3, None);
        assert_eq!(next_sort(s3, SortColumn::Size), s1);
    }

    #[test]
    fn test_other_column_resets_to_asc() {
        let current = Some(SortSpec::desc(SortColumn::Size));
        assert_eq!(
            next_sort(current, SortColumn::Document),
            Some(SortSpec::asc(SortColumn::Document))
        );
        let current = Some(SortSpec::asc(SortColumn::Document));
        assert_eq!(
            next_sort(current, SortColumn::Size),
            Some(SortSpec::asc(SortColumn::Size))
        );
    }

    #[test]
    fn test_indicator() {
        let spec = Some(SortSpec::asc(SortColumn::Size));
        assert_eq!(sort_indicator(spec, SortColumn::Size), " ▲");
        assert_eq!(sort_indicator(spec, SortColumn::Document), " ⇅");
        assert_eq!(sort_indicator(None, SortColumn::Size), " ⇅");
    }

    #[test]
    fn test_natural_cmp_numbers() {
        assert_eq!(natural_cmp("DOC-2", "DOC-10"), Ordering::Less);
        assert_eq!(natural_cmp("DOC-10", "DOC-2"), Ordering::Greater);
        assert_eq!(natural_cmp("2024-9", "2024-10"), Ordering::Less);
        assert_eq!(natural_cmp("VF 100", "VF 99"), Ordering::Greater);
    }

    #[test]
    fn test_natural_cmp_text() {
        assert_eq!(natural_cmp("abc", "ABD"), Ordering::Less);
        assert_eq!(natural_cmp("doc", "doc-1"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_natural_cmp_folds_accents() {
        assert_eq!(natural_cmp("École", "Zeep"), Ordering::Less);
        assert_eq!(natural_cmp("Émile", "Eric"), Ordering::Less);
        assert_eq!(natural_cmp("Ångström 2", "angstrom 10"), Ordering::Less);
        assert_ne!(natural_cmp("é", "e"), Ordering::Equal);
    }

    #[test]
    fn test_natural_cmp_leading_zeros() {
        assert_eq!(natural_cmp("A-007", "A-7"), Ordering::Greater);
        assert_eq!(natural_cmp("A-007", "A-8"), Ordering::Less);
    }
}
