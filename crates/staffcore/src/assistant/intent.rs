use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// What a free-text question is about, used to point the user at a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum Intent {
    Payroll,
    Leave,
    Attendance,
    Info,
}

impl Intent {
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Intent::Payroll => &["gaji", "payroll", "bayar", "salary", "penghasilan", "slip"],
            Intent::Leave => &["cuti", "leave", "izin", "libur", "vacation"],
            Intent::Attendance => &["absen", "clock", "masuk", "keluar", "hadir", "attendance"],
            Intent::Info => &["data", "profil", "profile", "informasi", "nik"],
        }
    }

    /// Menu hint appended to an answer.
    pub fn tip(self) -> &'static str {
        match self {
            Intent::Payroll => "For salary details, open the Payroll menu.",
            Intent::Leave => "For leave, open the Leave menu.",
            Intent::Attendance => "For clock in/out, open the Attendance menu.",
            Intent::Info => "For your full data, open the Profile menu.",
        }
    }
}

/// Every intent whose keywords appear in `query`, in declaration order.
pub fn detect_intents(query: &str) -> Vec<Intent> {
    let query = query.to_lowercase();
    Intent::iter()
        .filter(|intent| intent.keywords().iter().any(|kw| query.contains(kw)))
        .collect()
}

/// First detected intent, if any.
pub fn primary_intent(query: &str) -> Option<Intent> {
    detect_intents(query).into_iter().next()
}
