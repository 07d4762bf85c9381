use serde::{Deserialize, Serialize};

/// Number of single-character cells in a one-time passcode.
pub const OTP_LENGTH: usize = 6;
/// Minimum password length accepted before the registration call is made.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Named inputs of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FullName,
    Email,
    Username,
    Referrer,
    Country,
    Password,
    Phone,
    CouponCode,
    PackageType,
    Terms,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::FullName,
        FormField::Email,
        FormField::Username,
        FormField::Referrer,
        FormField::Country,
        FormField::Password,
        FormField::Phone,
        FormField::CouponCode,
        FormField::PackageType,
        FormField::Terms,
    ];

    /// Element name used by the form markup and the wire payload.
    pub fn name(self) -> &'static str {
        match self {
            FormField::FullName => "fullName",
            FormField::Email => "email",
            FormField::Username => "username",
            FormField::Referrer => "referrer",
            FormField::Country => "country",
            FormField::Password => "password",
            FormField::Phone => "phone",
            FormField::CouponCode => "couponCode",
            FormField::PackageType => "packageType",
            FormField::Terms => "terms",
        }
    }

    /// Text fields carry a value; `Terms` is a checkbox and carries a checked flag.
    pub fn is_text(self) -> bool {
        !matches!(self, FormField::Terms)
    }
}

/// Snapshot of the registration form taken when the passcode is confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDraft {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub referrer: String,
    pub country: String,
    pub password: String,
    pub phone: String,
    pub coupon_code: String,
    pub package_type: String,
    pub terms_accepted: bool,
}

impl RegistrationDraft {
    pub fn text(&self, field: FormField) -> Option<&str> {
        let value = match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::Username => &self.username,
            FormField::Referrer => &self.referrer,
            FormField::Country => &self.country,
            FormField::Password => &self.password,
            FormField::Phone => &self.phone,
            FormField::CouponCode => &self.coupon_code,
            FormField::PackageType => &self.package_type,
            FormField::Terms => return None,
        };
        Some(value.as_str())
    }

    pub fn set_text(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::FullName => self.full_name = value,
            FormField::Email => self.email = value,
            FormField::Username => self.username = value,
            FormField::Referrer => self.referrer = value,
            FormField::Country => self.country = value,
            FormField::Password => self.password = value,
            FormField::Phone => self.phone = value,
            FormField::CouponCode => self.coupon_code = value,
            FormField::PackageType => self.package_type = value,
            FormField::Terms => {}
        }
    }

    /// Length in UTF-16 code units, the unit browser form fields measure in.
    /// Characters outside the Basic Multilingual Plane count twice.
    pub fn password_len(&self) -> usize {
        self.password.encode_utf16().count()
    }
}

/// Fixed-length passcode made of single-character cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpCode {
    cells: [Option<char>; OTP_LENGTH],
}

impl OtpCode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cells = [None; OTP_LENGTH];
    }

    /// Stores raw cell input. Only the last non-whitespace character is kept,
    /// so a cell never holds more than one character. Returns the stored value.
    pub fn set(&mut self, index: usize, raw: &str) -> Option<char> {
        let cell = self.cells.get_mut(index)?;
        *cell = raw.chars().rev().find(|ch| !ch.is_whitespace());
        *cell
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied().flatten()
    }

    pub fn clear_cell(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = None;
        }
    }

    pub fn is_cell_empty(&self, index: usize) -> bool {
        self.get(index).is_none()
    }

    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled() == OTP_LENGTH
    }

    /// Concatenation of the cell contents in order; empty cells contribute nothing.
    pub fn value(&self) -> String {
        self.cells.iter().flatten().collect()
    }
}
