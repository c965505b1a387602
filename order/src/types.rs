//! Domain types for the box office order form.
//!
//! Value objects (identifiers, money), the immutable catalog records
//! ([`Event`], [`TicketType`]) and the editable form sections
//! ([`PurchaserFields`], [`PaymentFields`], [`OrderField`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound shown to the user next to each quantity input.
///
/// Only a presentation hint; see `QuantityPolicy` for enforcement.
pub const QUANTITY_HINT_MAX: u32 = 99;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier of a catalog event
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates an `EventId` from any string-like value
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of a ticket type, unique within its event (e.g. `vip`, `meet-and-greet`)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketTypeKey(String);

impl TicketTypeKey {
    /// Creates a `TicketTypeKey` from any string-like value
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TicketTypeKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

// ============================================================================
// Money Value Object (cents-based to avoid floating point errors)
// ============================================================================

/// Represents money in cents to avoid floating-point arithmetic errors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero cents
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Returns the amount in whole dollars (rounded down)
    #[must_use]
    pub const fn dollars(&self) -> u64 {
        self.0 / 100
    }

    /// Returns the amount divided by 100 as a floating point number
    ///
    /// For display and interop only; arithmetic stays in cents.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Ticket totals are far below 2^52 cents
    pub fn as_dollars_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two money amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Multiplies money by a quantity with overflow checking
    #[must_use]
    pub const fn checked_multiply(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as u64) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.dollars(), self.0 % 100)
    }
}

// ============================================================================
// Catalog records
// ============================================================================

/// One purchasable ticket category of an event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    /// Key used by the quantity input for this ticket type
    #[serde(rename = "type")]
    pub key: TicketTypeKey,
    /// Display name (e.g. "VIP")
    pub name: String,
    /// Short description of what the ticket includes
    pub description: String,
    /// Price per ticket
    pub cost: Money,
}

impl TicketType {
    /// Creates a ticket type
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        cost: Money,
    ) -> Self {
        Self {
            key: TicketTypeKey::new(key),
            name: name.into(),
            description: description.into(),
            cost,
        }
    }
}

/// A single ticketed concert, immutable once loaded into the catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier within the catalog
    pub id: EventId,
    /// Band or show name
    pub name: String,
    /// Calendar date of the concert
    pub date: NaiveDate,
    /// Venue and city
    pub location: String,
    /// Poster image URL
    pub img_url: String,
    /// Plain-text description (markup already removed by the catalog)
    pub description: String,
    /// Ticket types in display order
    pub ticket_types: Vec<TicketType>,
}

impl Event {
    /// Looks up one of this event's ticket types by key
    #[must_use]
    pub fn ticket_type(&self, key: &TicketTypeKey) -> Option<&TicketType> {
        self.ticket_types.iter().find(|ticket| &ticket.key == key)
    }

    /// Renders the concert date with a chrono format string
    ///
    /// `"%A, %B %-d"` gives "Thursday, June 26".
    #[must_use]
    pub fn display_date(&self, format: &str) -> String {
        self.date.format(format).to_string()
    }
}

// ============================================================================
// Form sections
// ============================================================================

/// Purchaser section of the form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaserFields {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Postal address
    pub address: String,
}

/// Payment section of the form, stored as typed
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFields {
    /// Card number
    pub card_number: String,
    /// Expiration (MM / YY)
    pub card_expiration: String,
    /// Card verification value
    #[serde(rename = "cardCVV")]
    pub card_cvv: String,
}

// Card data stays out of logs and panic messages.
impl fmt::Debug for PaymentFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentFields")
            .field("card_number", &redact(&self.card_number))
            .field("card_expiration", &redact(&self.card_expiration))
            .field("card_cvv", &redact(&self.card_cvv))
            .finish()
    }
}

const fn redact(value: &str) -> &'static str {
    if value.is_empty() { "" } else { "<redacted>" }
}

/// Every editable text field of the order form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderField {
    /// `PurchaserFields::first_name`
    FirstName,
    /// `PurchaserFields::last_name`
    LastName,
    /// `PurchaserFields::address`
    Address,
    /// `PaymentFields::card_number`
    CardNumber,
    /// `PaymentFields::card_expiration`
    CardExpiration,
    /// `PaymentFields::card_cvv`
    CardCvv,
}

impl OrderField {
    /// All fields in form order
    pub const ALL: [Self; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::Address,
        Self::CardNumber,
        Self::CardExpiration,
        Self::CardCvv,
    ];

    /// Maps a form input name (`firstName`, `cardCVV`, ...) to its field
    #[must_use]
    pub fn from_input_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.input_name() == name)
    }

    /// The form input name bound to this field
    #[must_use]
    pub const fn input_name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Address => "address",
            Self::CardNumber => "cardNumber",
            Self::CardExpiration => "cardExpiration",
            Self::CardCvv => "cardCVV",
        }
    }

    /// Placeholder text shown in the empty input
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Address => "Address",
            Self::CardNumber => "0000 0000 0000 0000",
            Self::CardExpiration => "MM / YY",
            Self::CardCvv => "CVV",
        }
    }

    /// Whether the field belongs to the payment section
    #[must_use]
    pub const fn is_payment(self) -> bool {
        matches!(self, Self::CardNumber | Self::CardExpiration | Self::CardCvv)
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.input_name())
    }
}
