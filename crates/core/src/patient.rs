//! Patient records held by the appointment queue.

use triage_types::CsvField;

/// One booked appointment.
///
/// Records are immutable once created. The disease is stored as given; whether it is a
/// known disease is checked when the record is booked, not here.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PatientRecord {
    appointment_number: u32,
    name: CsvField,
    disease: String,
    time_to_reach: u32,
}

impl PatientRecord {
    pub fn new(
        appointment_number: u32,
        name: CsvField,
        disease: impl Into<String>,
        time_to_reach: u32,
    ) -> Self {
        Self {
            appointment_number,
            name,
            disease: disease.into(),
            time_to_reach,
        }
    }

    pub fn appointment_number(&self) -> u32 {
        self.appointment_number
    }

    pub fn name(&self) -> &CsvField {
        &self.name
    }

    pub fn disease(&self) -> &str {
        &self.disease
    }

    /// Estimated travel time to the hospital, in minutes.
    pub fn time_to_reach(&self) -> u32 {
        self.time_to_reach
    }
}

impl std::fmt::Display for PatientRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Appointment Number: {}, Name: {}, Disease: {}, Time to reach: {}",
            self.appointment_number, self.name, self.disease, self.time_to_reach
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let record = PatientRecord::new(3, CsvField::new("Sam").unwrap(), "bleeding", 10);
        assert_eq!(
            record.to_string(),
            "Appointment Number: 3, Name: Sam, Disease: bleeding, Time to reach: 10"
        );
    }

    #[test]
    fn test_serialises_flat() {
        let record = PatientRecord::new(1, CsvField::new("Alex").unwrap(), "headache", 5);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["appointment_number"], 1);
        assert_eq!(json["name"], "Alex");
        assert_eq!(json["disease"], "headache");
        assert_eq!(json["time_to_reach"], 5);
    }
}
