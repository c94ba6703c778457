//! Plain-text cycle listing.

use crate::types::Cycle;

/// Separator placed between consecutive members of a listed cycle.
pub const CHAIN_SEPARATOR: &str = " --> ";

/// Render one cycle as `"<serial>> a --> b --> ..."`, without a trailing
/// newline.
///
/// Members are shown by label, or by configuration/reference id when
/// `identifier_only` is set.
#[must_use]
pub fn render_cycle_line(serial: usize, cycle: &Cycle, identifier_only: bool) -> String {
    let members: Vec<String> = cycle
        .components()
        .iter()
        .map(|component| {
            if identifier_only {
                component.identifier().to_string()
            } else {
                component.label()
            }
        })
        .collect();
    format!("{serial}> {}", members.join(CHAIN_SEPARATOR))
}

/// Render every cycle on its own line, numbered from 1.
#[must_use]
pub fn render_cycles_plain(cycles: &[Cycle], identifier_only: bool) -> String {
    let mut out = String::new();
    for (idx, cycle) in cycles.iter().enumerate() {
        out.push_str(&render_cycle_line(idx + 1, cycle, identifier_only));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Component, ComponentState};
    use rstest::rstest;

    fn pair() -> Cycle {
        Cycle::new(vec![
            Component::registered("A", 1, ComponentState::Active),
            Component::registered("B", 2, ComponentState::Satisfied),
        ])
        .unwrap()
    }

    #[rstest]
    #[case::ids(true, "1> 1 --> 2")]
    #[case::labels(false, "1> A [1] --> B [2]")]
    fn renders_single_line(#[case] identifier_only: bool, #[case] expected: &str) {
        assert_eq!(render_cycle_line(1, &pair(), identifier_only), expected);
    }

    #[test]
    fn foreign_members_show_class_and_reference_id() {
        let cycle = Cycle::new(vec![
            Component::registered("A", 1, ComponentState::Active),
            Component::foreign(42, "org.example.Log"),
        ])
        .unwrap();

        assert_eq!(render_cycle_line(3, &cycle, false), "3> A [1] --> org.example.Log [42]");
        assert_eq!(render_cycle_line(3, &cycle, true), "3> 1 --> 42");
    }

    #[test]
    fn listing_numbers_lines_from_one() {
        let self_loop =
            Cycle::new(vec![Component::registered("C", 3, ComponentState::Active)]).unwrap();

        let listing = render_cycles_plain(&[pair(), self_loop], true);

        assert_eq!(listing, "1> 1 --> 2\n2> 3\n");
    }

    #[test]
    fn empty_listing_is_empty() {
        assert_eq!(render_cycles_plain(&[], false), "");
    }
}
