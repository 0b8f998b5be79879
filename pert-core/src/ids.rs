//! Positional identifiers for milestones and tasks.
//!
//! Ids are never stored independently of position: the store recomputes them
//! from array indices after every structural edit, so they are always dense.

/// Id of the milestone at `index`.
///
/// The first 26 milestones are `A`..=`Z`. Beyond that the letters continue in
/// bijective base 26, the way spreadsheet columns do: `AA`, `AB`, …, `ZZ`,
/// `AAA`.
pub fn milestone_id_at(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Id of the task at `index` (zero-based) within `milestone_id`.
pub fn task_id_at(milestone_id: &str, index: usize) -> String {
    format!("{}{}", milestone_id, index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_single_letters() {
        assert_eq!(milestone_id_at(0), "A");
        assert_eq!(milestone_id_at(1), "B");
        assert_eq!(milestone_id_at(25), "Z");
    }

    #[test]
    fn test_ids_past_z_extend_with_two_letters() {
        assert_eq!(milestone_id_at(26), "AA");
        assert_eq!(milestone_id_at(27), "AB");
        assert_eq!(milestone_id_at(51), "AZ");
        assert_eq!(milestone_id_at(52), "BA");
        assert_eq!(milestone_id_at(701), "ZZ");
        assert_eq!(milestone_id_at(702), "AAA");
    }

    #[test]
    fn test_milestone_ids_are_unique() {
        let ids: std::collections::HashSet<_> = (0..1000).map(milestone_id_at).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_task_ids_are_one_based() {
        assert_eq!(task_id_at("A", 0), "A1");
        assert_eq!(task_id_at("C", 9), "C10");
        assert_eq!(task_id_at("AB", 2), "AB3");
    }
}
