//! Certification wizard: document uploads followed by biometric capture.

use std::collections::BTreeMap;

use crate::wizard::WizardStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CertStep {
    IdentityDocument,
    ProofOfAddress,
    MedicalRecord,
    Biometric,
    Done,
}

impl WizardStep for CertStep {
    const SEQUENCE: &'static [Self] = &[
        CertStep::IdentityDocument,
        CertStep::ProofOfAddress,
        CertStep::MedicalRecord,
        CertStep::Biometric,
        CertStep::Done,
    ];

    fn key(self) -> u8 {
        match self {
            CertStep::IdentityDocument => 1,
            CertStep::ProofOfAddress => 2,
            CertStep::MedicalRecord => 3,
            CertStep::Biometric => 4,
            CertStep::Done => 5,
        }
    }

    fn title(self) -> &'static str {
        match self {
            CertStep::IdentityDocument => "Identity Document",
            CertStep::ProofOfAddress => "Proof of Address",
            CertStep::MedicalRecord => "Medical Record",
            CertStep::Biometric => "Biometric Capture",
            CertStep::Done => "Certification Complete",
        }
    }
}

impl CertStep {
    pub fn is_upload(self) -> bool {
        matches!(
            self,
            CertStep::IdentityDocument | CertStep::ProofOfAddress | CertStep::MedicalRecord
        )
    }
}

/// A file picked for an upload step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub name: String,
    pub size_bytes: u64,
}

impl UploadedDocument {
    /// Size as shown under the file name, e.g. `"12.50 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.size_bytes as f64 / 1024.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BiometricModality {
    Fingerprint,
    Face,
}

impl BiometricModality {
    pub const ALL: [BiometricModality; 2] =
        [BiometricModality::Fingerprint, BiometricModality::Face];

    pub fn label(self) -> &'static str {
        match self {
            BiometricModality::Fingerprint => "Fingerprint",
            BiometricModality::Face => "Face",
        }
    }
}

/// Capture button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Processing,
    Captured,
}

/// Everything gathered by the certification wizard.
#[derive(Debug, Clone, Default)]
pub struct CertificationRecord {
    pub documents: BTreeMap<CertStep, UploadedDocument>,
    pub captures: BTreeMap<BiometricModality, CaptureState>,
}

impl CertificationRecord {
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn capture_state(&self, modality: BiometricModality) -> CaptureState {
        self.captures.get(&modality).copied().unwrap_or_default()
    }
}
