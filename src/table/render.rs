// Grid view of a decision table
use super::DecisionTable;
use crate::types::Expect;

use std::fmt;

const SEPARATOR: &str = " |";

/// One row per condition (`Y` expects true, blank expects false, `-` is
/// don't care), a blank row, then one row per action (`X` where the case
/// triggers it). Columns are cases in registration order.
impl<A, R> fmt::Display for DecisionTable<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = std::iter::once(self.name.as_str())
            .chain(self.conditions.iter().map(|c| c.name()))
            .chain(self.actions.iter().map(|a| a.name()))
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(0);

        let headers: Vec<String> = (0..self.cases.len()).map(|id| id.to_string()).collect();
        let widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

        write_row(f, &self.name, label_width, &headers, &widths)?;

        for (id, condition) in self.conditions.iter().enumerate() {
            let cells: Vec<&str> = self
                .cases
                .iter()
                .map(|case| match case.result().get(&id) {
                    Some(Expect::True) => "Y",
                    Some(Expect::DontCare) => "-",
                    Some(Expect::False) | None => "",
                })
                .collect();
            write_row(f, condition.name(), label_width, &cells, &widths)?;
        }

        let blank = vec![""; self.cases.len()];
        write_row(f, "", label_width, &blank, &widths)?;

        for (id, action) in self.actions.iter().enumerate() {
            let cells: Vec<&str> = self
                .cases
                .iter()
                .map(|case| if case.includes(id) { "X" } else { "" })
                .collect();
            write_row(f, action.name(), label_width, &cells, &widths)?;
        }

        Ok(())
    }
}

fn write_row<S: AsRef<str>>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    label_width: usize,
    cells: &[S],
    widths: &[usize],
) -> fmt::Result {
    write!(f, "{:<label_width$}{}", label, SEPARATOR)?;
    for (cell, &width) in cells.iter().zip(widths) {
        write!(f, " {:^width$}{}", cell.as_ref(), SEPARATOR)?;
    }
    writeln!(f)
}
