//! Closed value sets exchanged with the backend.
//!
//! Every enum travels as a short wire code (the backend's own vocabulary) and
//! is shown to the user through a human label. The `CHOICES` table doubles as
//! the option list of the matching form picker.

use serde::{Deserialize, Serialize};

/// One selectable option: the wire code stored/sent, and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub code: &'static str,
    pub label: &'static str,
}

/// Look up the display label for a wire code, falling back to the code itself.
pub fn label_for(choices: &[Choice], code: &str) -> String {
    choices
        .iter()
        .find(|c| c.code == code)
        .map_or_else(|| code.to_string(), |c| c.label.to_string())
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => ($code:literal, $label:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Picker options in declaration order.
            pub const CHOICES: &'static [Choice] = &[$(Choice { code: $code, label: $label }),+];

            /// Code sent to and received from the backend.
            pub fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Label shown on cards and pickers.
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }
    };
}

wire_enum! {
    /// How popular a movie genre currently is.
    Popularity {
        Low => ("B", "Low"),
        Medium => ("M", "Medium"),
        High => ("A", "High"),
    }
}

wire_enum! {
    /// Projection format of a room.
    RoomType {
        TwoD => ("2D", "2D"),
        ThreeD => ("3D", "3D"),
        Imax => ("IMAX", "IMAX"),
        Vip => ("VIP", "VIP"),
    }
}

wire_enum! {
    ClientGender {
        Male => ("M", "Male"),
        Female => ("F", "Female"),
        Other => ("O", "Other"),
    }
}

wire_enum! {
    /// Age rating attached to a ticket.
    Rating {
        General => ("L", "All ages"),
        Ten => ("10", "10 years"),
        Twelve => ("12", "12 years"),
        Fourteen => ("14", "14 years"),
        Sixteen => ("16", "16 years"),
        Eighteen => ("18", "18 years"),
    }
}

wire_enum! {
    PaymentMethod {
        Boleto => ("boleto", "Boleto"),
        Card => ("cartao", "Card"),
        Pix => ("pix", "Pix"),
    }
}

wire_enum! {
    TicketStatus {
        Pending => ("pendente", "Pending"),
        Paid => ("pago", "Paid"),
        Cancelled => ("cancelado", "Cancelled"),
    }
}

wire_enum! {
    /// Audio/subtitle mode of a session.
    Language {
        Dubbed => ("DUB", "Dubbed"),
        Subtitled => ("LEG", "Subtitled"),
        Original => ("ORI", "Original"),
    }
}

wire_enum! {
    /// Admission type of a ticket sold for a session.
    AdmissionType {
        Full => ("inteira", "Full price"),
        Half => ("meia", "Half price"),
        Free => ("cortesia", "Complimentary"),
    }
}
