//! Static business data: the shop, its services, and the barber roster.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A bookable service with its price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub price: Decimal,
}

impl Service {
    /// Label shown in the service menu: `"Corte - R$35.00"`.
    pub fn menu_label(&self) -> String {
        format!("{} - R${:.2}", self.name, self.price)
    }
}

/// A staff member who can take a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barber {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub bio: String,
}

/// The shop the assistant books for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub name: String,
    pub services: Vec<Service>,
}

impl Shop {
    /// Demo shop used by the terminal frontend and tests.
    pub fn demo() -> Self {
        Self {
            name: "Barbearia Central".to_string(),
            services: vec![
                Service {
                    name: "Corte".into(),
                    price: dec!(35.00),
                },
                Service {
                    name: "Barba".into(),
                    price: dec!(25.00),
                },
                Service {
                    name: "Corte + Barba".into(),
                    price: dec!(50.00),
                },
            ],
        }
    }
}

/// The default barber roster.
pub fn default_roster() -> Vec<Barber> {
    vec![
        Barber {
            id: "1".into(),
            name: "Rafael".into(),
            photo: Some("/globe.png".into()),
            bio: "Especialista em cortes clássicos e barba.".into(),
        },
        Barber {
            id: "2".into(),
            name: "Lucas".into(),
            photo: None,
            bio: "Cortes modernos e fade.".into(),
        },
        Barber {
            id: "3".into(),
            name: "Marcos".into(),
            photo: None,
            bio: "Cliente fiel há 8 anos — ótimo em cortes rápidos.".into(),
        },
        Barber {
            id: "4".into(),
            name: "João".into(),
            photo: None,
            bio: "Atendimento tranquilo e corte feminino.".into(),
        },
    ]
}
