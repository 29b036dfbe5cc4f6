//! Helpers shared by sklog's unit tests.

pub mod fixtures;

/// One named row of a table-driven test.
#[derive(Debug, Clone)]
pub struct Case<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

impl<I, E> Case<I, E> {
    pub const fn new(name: &'static str, input: I, expected: E) -> Self {
        Self {
            name,
            input,
            expected,
        }
    }
}

/// Check `f(input) == expected` for every row. All mismatches are collected
/// so one run reports every failing row by name.
///
/// # Panics
/// When any row does not match.
pub fn assert_table<I, E, F>(cases: &[Case<I, E>], f: F)
where
    I: std::fmt::Debug + Clone,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E,
{
    let failures: Vec<String> = cases
        .iter()
        .filter_map(|case| {
            let actual = f(case.input.clone());
            (actual != case.expected).then(|| {
                format!(
                    "{}: input {:?}, expected {:?}, got {:?}",
                    case.name, case.input, case.expected, actual
                )
            })
        })
        .collect();
    assert!(failures.is_empty(), "table rows failed:\n{}", failures.join("\n"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_table_passes_matching_rows() {
        assert_table(&[Case::new("double", 2, 4), Case::new("zero", 0, 0)], |n: i32| n * 2);
    }

    #[test]
    #[should_panic(expected = "odd")]
    fn test_assert_table_names_failing_row() {
        assert_table(&[Case::new("even", 2, 4), Case::new("odd", 3, 7)], |n: i32| n * 2);
    }
}
