//! Case-insensitive substring filtering over fetched collections

use unicode_normalization::UnicodeNormalization;

use crate::models::{
    equipment::Equipment, personnel::Personnel, request::EquipmentRequest,
    verification::Verification,
};

/// Lowercased NFC form used on both sides of a comparison
pub fn fold(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

/// Fields a collection row can be searched on
pub trait Searchable {
    fn search_fields(&self) -> Vec<String>;
}

/// True when any field contains the term. An empty term matches everything.
pub fn matches<T: Searchable>(item: &T, term: &str) -> bool {
    let term = fold(term.trim());
    if term.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| fold(field).contains(&term))
}

/// Keep the rows matching `term`; `None` keeps the whole collection
pub fn filter_by_term<T: Searchable>(items: Vec<T>, term: Option<&str>) -> Vec<T> {
    match term {
        Some(term) if !term.trim().is_empty() => {
            items.into_iter().filter(|item| matches(item, term)).collect()
        }
        _ => items,
    }
}

impl Searchable for Equipment {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.type_name.clone(), self.serial_number.clone()];
        if let Some(ref name) = self.assigned_to_name {
            fields.push(name.clone());
        }
        fields
    }
}

impl Searchable for Personnel {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.full_name(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
        ];
        fields.extend(self.grade.iter().cloned());
        fields.extend(self.station.iter().cloned());
        fields
    }
}

impl Searchable for Verification {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.equipment_name.clone(), self.assignee_label()];
        fields.extend(self.equipment_serial.iter().cloned());
        fields
    }
}

impl Searchable for EquipmentRequest {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.description.clone()];
        fields.extend(self.requester_name.iter().cloned());
        fields.extend(self.equipment_serial.iter().cloned());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::PersonnelStatus;
    use uuid::Uuid;

    fn person(first: &str, last: &str, grade: &str, station: &str, email: &str) -> Personnel {
        Personnel {
            id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            grade: Some(grade.to_string()),
            station: Some(station.to_string()),
            email: email.to_string(),
            phone: None,
            status: PersonnelStatus::Active,
            equipment_count: 0,
            created_at: None,
        }
    }

    fn roster() -> Vec<Personnel> {
        vec![
            person("Martin", "Dubois", "Sergent", "CS Nord", "m.dubois@sdis.fr"),
            person("Sophie", "Laurent", "Caporal", "CS Principal", "s.laurent@sdis.fr"),
            person("Pierre", "Moreau", "Sapeur", "CS Sud", "pierre.moreau@sdis.fr"),
        ]
    }

    fn last_names(rows: &[Personnel]) -> Vec<&str> {
        rows.iter().map(|p| p.last_name.as_str()).collect()
    }

    #[test]
    fn test_empty_term_keeps_everything() {
        assert_eq!(filter_by_term(roster(), Some("")).len(), 3);
        assert_eq!(filter_by_term(roster(), Some("   ")).len(), 3);
        assert_eq!(filter_by_term(roster(), None).len(), 3);
    }

    #[test]
    fn test_each_personnel_field_is_searched() {
        assert_eq!(last_names(&filter_by_term(roster(), Some("sophie"))), vec!["Laurent"]);
        assert_eq!(last_names(&filter_by_term(roster(), Some("MOREAU"))), vec!["Moreau"]);
        assert_eq!(last_names(&filter_by_term(roster(), Some("sergent"))), vec!["Dubois"]);
        assert_eq!(last_names(&filter_by_term(roster(), Some("cs sud"))), vec!["Moreau"]);
        assert_eq!(last_names(&filter_by_term(roster(), Some("s.laurent@"))), vec!["Laurent"]);
    }

    #[test]
    fn test_full_name_matches() {
        assert_eq!(last_names(&filter_by_term(roster(), Some("martin dubois"))), vec!["Dubois"]);
    }

    #[test]
    fn test_substring_shared_by_several_rows() {
        // every email shares the domain
        assert_eq!(filter_by_term(roster(), Some("sdis.fr")).len(), 3);
        assert_eq!(last_names(&filter_by_term(roster(), Some("ca"))), vec!["Laurent"]);
    }

    #[test]
    fn test_no_match() {
        assert!(filter_by_term(roster(), Some("lieutenant")).is_empty());
    }

    #[test]
    fn test_fold_normalizes_composition() {
        // "é" precomposed vs "e" + combining acute accent
        assert_eq!(fold("Congé"), fold("Conge\u{301}"));
        assert_eq!(fold("ÉQUIPE"), "équipe");
    }
}
