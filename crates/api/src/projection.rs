//! Response projections.
//!
//! Each resource is returned with its parent chain embedded: a vaccine
//! carries its patient, a dose carries its vaccine (and that vaccine's
//! patient). The structs here pin the wire keys; the `*_view(s)` loaders walk
//! the foreign keys one hop per level.
//!
//! A parent that cannot be found while projecting means the store broke its
//! own referential integrity, so it is reported as
//! [`CoreError::Inconsistent`] rather than rendered as a partial object.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use sqlx::PgPool;
use vaxrecord_core::error::CoreError;
use vaxrecord_core::types::DbId;
use vaxrecord_db::models::dose::Dose;
use vaxrecord_db::models::patient::Patient;
use vaxrecord_db::models::vaccine::Vaccine;
use vaxrecord_db::repositories::{PatientRepo, VaccineRepo};

use crate::error::AppResult;

/// Top-level patient projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientView {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "last Name")]
    pub last_name: String,
}

/// Patient as embedded inside a vaccine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientRef {
    pub id: DbId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Last Name")]
    pub last_name: String,
}

/// Vaccine projection with its owning patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaccineView {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "Dose Date")]
    pub dose_date: String,
    #[serde(rename = "Dose Number")]
    pub dose_number: i32,
    #[serde(rename = "Vaccine Type")]
    pub vaccine_type: String,
    #[serde(rename = "Patient")]
    pub patient: PatientRef,
}

/// Dose projection with its vaccine (and the vaccine's patient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoseView {
    pub id: DbId,
    #[serde(rename = "Dose Date")]
    pub dose_date: String,
    #[serde(rename = "Dose Number")]
    pub dose_number: i32,
    #[serde(rename = "Application Type")]
    pub application_type: String,
    #[serde(rename = "Type Dose")]
    pub type_dose: String,
    pub vaccine: VaccineView,
}

impl From<&Patient> for PatientView {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name.clone(),
            last_name: patient.last_name.clone(),
        }
    }
}

impl From<&Patient> for PatientRef {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name.clone(),
            last_name: patient.last_name.clone(),
        }
    }
}

impl VaccineView {
    pub fn new(vaccine: &Vaccine, patient: &Patient) -> Self {
        Self {
            id: vaccine.id,
            name: vaccine.vaccine_name.clone(),
            dose_date: vaccine.dose_date.clone(),
            dose_number: vaccine.dose_number,
            vaccine_type: vaccine.vaccine_type.clone(),
            patient: PatientRef::from(patient),
        }
    }
}

impl DoseView {
    pub fn new(dose: &Dose, vaccine: &Vaccine, patient: &Patient) -> Self {
        Self {
            id: dose.id,
            dose_date: dose.dose_date.clone(),
            dose_number: dose.dose_number,
            application_type: dose.application_type.clone(),
            type_dose: dose.type_dose.clone(),
            vaccine: VaccineView::new(vaccine, patient),
        }
    }
}

// ---------------------------------------------------------------------------
// Pure assembly
// ---------------------------------------------------------------------------

fn missing_parent(child: &str, child_id: DbId, parent: &str, parent_id: DbId) -> CoreError {
    CoreError::Inconsistent(format!(
        "{child} {child_id} references missing {parent} {parent_id}"
    ))
}

/// Join vaccines with an already-loaded patient index.
pub fn join_vaccines(
    vaccines: &[Vaccine],
    patients: &HashMap<DbId, Patient>,
) -> Result<Vec<VaccineView>, CoreError> {
    vaccines
        .iter()
        .map(|vaccine| {
            let patient = patients.get(&vaccine.patient_id).ok_or_else(|| {
                missing_parent("Vaccine", vaccine.id, "Patient", vaccine.patient_id)
            })?;
            Ok(VaccineView::new(vaccine, patient))
        })
        .collect()
}

/// Join doses with already-loaded vaccine and patient indexes.
pub fn join_doses(
    doses: &[Dose],
    vaccines: &HashMap<DbId, Vaccine>,
    patients: &HashMap<DbId, Patient>,
) -> Result<Vec<DoseView>, CoreError> {
    doses
        .iter()
        .map(|dose| {
            let vaccine = vaccines
                .get(&dose.vaccine_id)
                .ok_or_else(|| missing_parent("Dose", dose.id, "Vaccine", dose.vaccine_id))?;
            let patient = patients.get(&vaccine.patient_id).ok_or_else(|| {
                missing_parent("Vaccine", vaccine.id, "Patient", vaccine.patient_id)
            })?;
            Ok(DoseView::new(dose, vaccine, patient))
        })
        .collect()
}

fn distinct_ids(ids: impl Iterator<Item = DbId>) -> Vec<DbId> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Project one vaccine, looking up its patient.
pub async fn vaccine_view(pool: &PgPool, vaccine: &Vaccine) -> AppResult<VaccineView> {
    let patient = PatientRepo::find_by_id(pool, vaccine.patient_id)
        .await?
        .ok_or_else(|| missing_parent("Vaccine", vaccine.id, "Patient", vaccine.patient_id))?;
    Ok(VaccineView::new(vaccine, &patient))
}

/// Project one dose, looking up its vaccine and then that vaccine's patient.
pub async fn dose_view(pool: &PgPool, dose: &Dose) -> AppResult<DoseView> {
    let vaccine = VaccineRepo::find_by_id(pool, dose.vaccine_id)
        .await?
        .ok_or_else(|| missing_parent("Dose", dose.id, "Vaccine", dose.vaccine_id))?;
    let patient = PatientRepo::find_by_id(pool, vaccine.patient_id)
        .await?
        .ok_or_else(|| missing_parent("Vaccine", vaccine.id, "Patient", vaccine.patient_id))?;
    Ok(DoseView::new(dose, &vaccine, &patient))
}

/// Project a list of vaccines with one batched patient lookup.
pub async fn vaccine_views(pool: &PgPool, vaccines: &[Vaccine]) -> AppResult<Vec<VaccineView>> {
    if vaccines.is_empty() {
        return Ok(Vec::new());
    }
    let patient_ids = distinct_ids(vaccines.iter().map(|v| v.patient_id));
    let patients = index_patients(PatientRepo::find_by_ids(pool, &patient_ids).await?);
    Ok(join_vaccines(vaccines, &patients)?)
}

/// Project a list of doses with one batched lookup per parent level.
pub async fn dose_views(pool: &PgPool, doses: &[Dose]) -> AppResult<Vec<DoseView>> {
    if doses.is_empty() {
        return Ok(Vec::new());
    }
    let vaccine_ids = distinct_ids(doses.iter().map(|d| d.vaccine_id));
    let vaccines: HashMap<DbId, Vaccine> = VaccineRepo::find_by_ids(pool, &vaccine_ids)
        .await?
        .into_iter()
        .map(|v| (v.id, v))
        .collect();

    let patient_ids = distinct_ids(vaccines.values().map(|v| v.patient_id));
    let patients = index_patients(PatientRepo::find_by_ids(pool, &patient_ids).await?);

    Ok(join_doses(doses, &vaccines, &patients)?)
}

fn index_patients(patients: Vec<Patient>) -> HashMap<DbId, Patient> {
    patients.into_iter().map(|p| (p.id, p)).collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use vaxrecord_core::types::Timestamp;

    use super::*;

    // Timestamps never reach a projection.
    fn now() -> Timestamp {
        Timestamp::default()
    }

    fn patient(id: DbId) -> Patient {
        Patient {
            id,
            name: "Ana".into(),
            last_name: "Silva".into(),
            created_at: now(),
            updated_at: now(),
        }
    }

    fn vaccine(id: DbId, patient_id: DbId) -> Vaccine {
        Vaccine {
            id,
            patient_id,
            vaccine_name: "BCG".into(),
            dose_date: "2024-01-01".into(),
            dose_number: 1,
            vaccine_type: "live".into(),
            created_at: now(),
            updated_at: now(),
        }
    }

    fn dose(id: DbId, vaccine_id: DbId) -> Dose {
        Dose {
            id,
            vaccine_id,
            type_dose: "booster".into(),
            dose_date: "2024-02-01".into(),
            dose_number: 2,
            application_type: "oral".into(),
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn patient_view_uses_wire_keys() {
        let json = serde_json::to_value(PatientView::from(&patient(1))).unwrap();
        assert_eq!(json, json!({"id": 1, "name": "Ana", "last Name": "Silva"}));
    }

    #[test]
    fn vaccine_view_embeds_patient() {
        let json = serde_json::to_value(VaccineView::new(&vaccine(3, 1), &patient(1))).unwrap();
        assert_eq!(
            json,
            json!({
                "id": 3,
                "name": "BCG",
                "Dose Date": "2024-01-01",
                "Dose Number": 1,
                "Vaccine Type": "live",
                "Patient": {"id": 1, "Name": "Ana", "Last Name": "Silva"}
            })
        );
    }

    #[test]
    fn dose_view_embeds_vaccine_and_patient() {
        let view = DoseView::new(&dose(5, 3), &vaccine(3, 1), &patient(1));
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["Dose Number"], 2);
        assert!(json["Dose Number"].is_i64());
        assert_eq!(json["Type Dose"], "booster");
        assert_eq!(json["Application Type"], "oral");
        assert_eq!(json["vaccine"]["id"], 3);
        assert_eq!(json["vaccine"]["Patient"]["Name"], "Ana");
    }

    #[test]
    fn join_vaccines_keeps_input_order() {
        let patients = index_patients(vec![patient(1), patient(2)]);
        let views = join_vaccines(&[vaccine(9, 2), vaccine(4, 1)], &patients).unwrap();
        let ids: Vec<_> = views.iter().map(|v| (v.id, v.patient.id)).collect();
        assert_eq!(ids, vec![(9, 2), (4, 1)]);
    }

    #[test]
    fn join_vaccines_reports_missing_patient_as_inconsistent() {
        let result = join_vaccines(&[vaccine(9, 77)], &HashMap::new());
        assert_matches!(result, Err(CoreError::Inconsistent(msg)) if msg.contains("Patient 77"));
    }

    #[test]
    fn join_doses_reports_missing_vaccine_as_inconsistent() {
        let patients = index_patients(vec![patient(1)]);
        let result = join_doses(&[dose(5, 3)], &HashMap::new(), &patients);
        assert_matches!(result, Err(CoreError::Inconsistent(msg)) if msg.contains("Vaccine 3"));
    }

    #[test]
    fn join_doses_reports_missing_grandparent_as_inconsistent() {
        let vaccines: HashMap<_, _> = [(3, vaccine(3, 1))].into_iter().collect();
        let result = join_doses(&[dose(5, 3)], &vaccines, &HashMap::new());
        assert_matches!(result, Err(CoreError::Inconsistent(_)));
    }

    #[test]
    fn distinct_ids_preserves_first_occurrence() {
        assert_eq!(distinct_ids([3, 1, 3, 2, 1].into_iter()), vec![3, 1, 2]);
    }
}
