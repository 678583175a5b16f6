use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use kinesia_core::models::{AuditedVisit, RiskVisit};

use crate::period::civil_date;

/// Worklist visits for one professional, in classifier order.
#[derive(Debug, Clone, Serialize)]
pub struct ProfessionalGroup {
    pub professional_id: String,
    pub professional_name: String,
    pub visits: Vec<RiskVisit>,
}

/// Group worklist visits by professional. Group order is first appearance
/// in the input, which keeps the highest-risk professionals on top;
/// membership preserves the classifier's sort.
pub fn group_by_professional(visits: Vec<RiskVisit>) -> Vec<ProfessionalGroup> {
    let mut groups: Vec<ProfessionalGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for visit in visits {
        match index.get(&visit.professional_id) {
            Some(&i) => groups[i].visits.push(visit),
            None => {
                index.insert(visit.professional_id.clone(), groups.len());
                groups.push(ProfessionalGroup {
                    professional_id: visit.professional_id.clone(),
                    professional_name: visit.professional_name.clone(),
                    visits: vec![visit],
                });
            }
        }
    }
    groups
}

/// Audit-history visits for one calendar year.
#[derive(Debug, Clone, Serialize)]
pub struct YearGroup {
    pub year: i16,
    pub visits: Vec<AuditedVisit>,
}

/// Group audit-history visits by calendar year, newest year first;
/// membership preserves the classifier's sort.
pub fn group_by_year(visits: Vec<AuditedVisit>) -> Vec<YearGroup> {
    let mut by_year: BTreeMap<i16, Vec<AuditedVisit>> = BTreeMap::new();
    for visit in visits {
        let year = civil_date(visit.summary.date).year();
        by_year.entry(year).or_default().push(visit);
    }

    by_year
        .into_iter()
        .rev()
        .map(|(year, visits)| YearGroup { year, visits })
        .collect()
}
