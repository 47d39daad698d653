use crate::domain::model::{topology, AssignmentState, Cell, Participant, PRIMARY_GROUPS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

/// Group the roster by cell in topology order, members sorted by display name
/// (code as tie-break). Pure projection: identical input yields identical
/// output, so renderers downstream need no ordering logic of their own.
pub fn grouped_roster<'a>(records: &'a [Participant]) -> Vec<(Cell, Vec<&'a Participant>)> {
    let mut groups: Vec<(Cell, Vec<&Participant>)> =
        topology().into_iter().map(|c| (c, Vec::new())).collect();

    for participant in records {
        if let AssignmentState::Assigned(cell) = participant.assignment_state() {
            if let Some((_, members)) = groups.iter_mut().find(|(c, _)| *c == cell) {
                members.push(participant);
            }
        }
    }

    for (_, members) in groups.iter_mut() {
        members.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.code.cmp(&b.code))
        });
    }
    groups
}

pub fn pending<'a>(records: &'a [Participant]) -> Vec<&'a Participant> {
    let mut pending: Vec<&Participant> = records.iter().filter(|p| !p.is_assigned()).collect();
    pending.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    pending
}

/// Human-readable roster, one section per primary group with its populated
/// subgroups, headed by the course metadata.
pub fn render_text<C: ConfigProvider>(
    records: &[Participant],
    config: &C,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", config.course_title()));
    out.push_str(&format!("{}\n", config.department()));
    out.push_str(&format!("Lecturer: {}\n", config.lecturer()));
    out.push_str(&format!(
        "Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M")
    ));

    let groups = grouped_roster(records);
    for primary in PRIMARY_GROUPS {
        out.push_str(&format!("\n=== Group {} ===\n", primary));
        for (cell, members) in groups.iter().filter(|(c, _)| c.primary == primary) {
            if members.is_empty() {
                continue;
            }
            out.push_str(&format!("\nSubgroup {} ({} members)\n", cell, members.len()));
            for (i, p) in members.iter().enumerate() {
                out.push_str(&format!("  {}. {} ({})\n", i + 1, p.display_name, p.code));
            }
        }
    }

    let waiting = pending(records);
    if !waiting.is_empty() {
        out.push_str(&format!("\nPending assignment ({})\n", waiting.len()));
        for p in waiting {
            out.push_str(&format!("  - {} ({})\n", p.display_name, p.code));
        }
    }
    out
}

/// Full roster as CSV, one row per participant in registration order.
pub fn write_csv(records: &[Participant]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["name", "code", "primary_group", "subgroup", "group", "registered_at"])?;

    for p in records {
        let primary = p.primary_group.map(String::from).unwrap_or_default();
        let sub = p.subgroup.map(|s| s.to_string()).unwrap_or_default();
        let group = match p.assignment_state() {
            AssignmentState::Assigned(cell) => cell.label(),
            _ => "Not assigned".to_string(),
        };
        writer.write_record([
            p.display_name.as_str(),
            p.code.as_str(),
            primary.as_str(),
            sub.as_str(),
            group.as_str(),
            p.registered_at.to_rfc3339().as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CELL_COUNT;

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn capacity_per_cell(&self) -> usize {
            8
        }
        fn code_prefix(&self) -> &str {
            "EE"
        }
        fn code_digits(&self) -> usize {
            7
        }
        fn course_title(&self) -> &str {
            "Renewable Energy Systems"
        }
        fn lecturer(&self) -> &str {
            "Mr. Efah Frank"
        }
        fn department(&self) -> &str {
            "Department of Electrical and Electronics Engineering"
        }
    }

    fn assigned(name: &str, code: &str, cell: Cell) -> Participant {
        let mut p = Participant::new(code.to_string(), name.to_string());
        p.assign(cell);
        p
    }

    #[test]
    fn test_grouped_roster_sorts_members_by_name() {
        let records = vec![
            assigned("Yaw Darko", "EE2021003", Cell::new('A', 1)),
            assigned("Ama Mensah", "EE2021001", Cell::new('A', 1)),
            assigned("Kofi Boateng", "EE2021002", Cell::new('B', 2)),
        ];

        let groups = grouped_roster(&records);
        assert_eq!(groups.len(), CELL_COUNT);

        let (cell, members) = &groups[0];
        assert_eq!(*cell, Cell::new('A', 1));
        assert_eq!(members[0].display_name, "Ama Mensah");
        assert_eq!(members[1].display_name, "Yaw Darko");
    }

    #[test]
    fn test_grouped_roster_tie_breaks_on_code() {
        let records = vec![
            assigned("Ama Mensah", "EE2021009", Cell::new('C', 3)),
            assigned("Ama Mensah", "EE2021001", Cell::new('C', 3)),
        ];
        let groups = grouped_roster(&records);
        let (_, members) = groups.iter().find(|(c, _)| *c == Cell::new('C', 3)).unwrap();
        assert_eq!(members[0].code, "EE2021001");
        assert_eq!(members[1].code, "EE2021009");
    }

    #[test]
    fn test_render_text_contains_header_and_sections() {
        let records = vec![
            assigned("Ama Mensah", "EE2021001", Cell::new('A', 1)),
            Participant::new("EE2021004".to_string(), "Esi Owusu".to_string()),
        ];

        let text = render_text(&records, &TestConfig, Utc::now());
        assert!(text.contains("Renewable Energy Systems"));
        assert!(text.contains("Lecturer: Mr. Efah Frank"));
        assert!(text.contains("=== Group A ==="));
        assert!(text.contains("Subgroup A1 (1 members)"));
        assert!(text.contains("1. Ama Mensah (EE2021001)"));
        assert!(text.contains("Pending assignment (1)"));
        assert!(text.contains("Esi Owusu"));
    }

    #[test]
    fn test_write_csv_rows() {
        let records = vec![
            assigned("Ama Mensah", "EE2021001", Cell::new('E', 5)),
            Participant::new("EE2021002".to_string(), "Kofi Boateng".to_string()),
        ];

        let csv = write_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "name,code,primary_group,subgroup,group,registered_at");
        assert!(lines[1].starts_with("Ama Mensah,EE2021001,E,5,E5,"));
        assert!(lines[2].starts_with("Kofi Boateng,EE2021002,,,Not assigned,"));
    }

    #[test]
    fn test_projection_is_stable() {
        let records = vec![
            assigned("Ama Mensah", "EE2021001", Cell::new('A', 2)),
            assigned("Kofi Boateng", "EE2021002", Cell::new('A', 2)),
        ];
        let once = render_text(&records, &TestConfig, DateTime::<Utc>::MIN_UTC);
        let twice = render_text(&records, &TestConfig, DateTime::<Utc>::MIN_UTC);
        assert_eq!(once, twice);
    }
}
