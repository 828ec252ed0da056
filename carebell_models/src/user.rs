pub type PatientId = i64;
