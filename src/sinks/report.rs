//! Formatted listing of a learned value table.

use std::fmt;

use crate::algorithms::rl::QTable;

/// Displays one agent's value table, one row per state.
pub struct ValueTableReport<'a> {
    pub agent_id: usize,
    pub table: &'a QTable,
}

impl<'a> ValueTableReport<'a> {
    pub fn new(agent_id: usize, table: &'a QTable) -> Self {
        Self { agent_id, table }
    }
}

impl fmt::Display for ValueTableReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(40);
        writeln!(f, "Agent {} Q-Table:", self.agent_id)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "State | Action 0 | Action 1 | Action 2")?;
        writeln!(f, "{}", rule)?;
        for (state, row) in self.table.rows().enumerate() {
            writeln!(
                f,
                "{:5} | {:8.2} | {:8.2} | {:8.2}",
                state, row[0], row[1], row[2]
            )?;
        }
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Action;

    #[test]
    fn lists_every_state() {
        let mut table = QTable::new(2);
        table.set(1, Action::Right, 12.5).unwrap();
        let text = ValueTableReport::new(0, &table).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Agent 0 Q-Table:");
        assert_eq!(lines[2], "State | Action 0 | Action 1 | Action 2");
        assert_eq!(lines[4], "    0 |     0.00 |     0.00 |     0.00");
        assert_eq!(lines[5], "    1 |     0.00 |     0.00 |    12.50");
        assert_eq!(lines.len(), 7);
    }
}
