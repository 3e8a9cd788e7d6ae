// src/db/seed.rs

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::{
    company::CompanyInfo,
    entity::{Address, ContactPerson, Entity, EntityStatus, EntityType},
};

// Dados de exemplo para a demonstração (SEED_SAMPLE_DATA=true).
pub fn sample_entities() -> Vec<Entity> {
    let rows = [
        ("Northwind Corporation", EntityType::Corporation, "NW-2001", 1250, EntityStatus::Active,
         ("1 Harbour Way", "Seattle", "98101", "USA"), ("Laura Callahan", "General Counsel", "laura.callahan@northwind.example", "+1 206 555 0100")),
        ("Northwind Europe LLC", EntityType::Llc, "NWE-3410", 310, EntityStatus::Active,
         ("Kaiserstraße 12", "Frankfurt", "60311", "Germany"), ("Jonas Weber", "Managing Director", "jonas.weber@northwind.example", "+49 69 555 0101")),
        ("Northwind Logistics", EntityType::Subsidiary, "NWL-0087", 540, EntityStatus::Pending,
         ("Rua Augusta 200", "Lisboa", "1100-053", "Portugal"), ("Marta Silva", "Operations Lead", "marta.silva@northwind.example", "+351 21 555 0102")),
        ("Northwind Research", EntityType::Division, "NWR-5530", 42, EntityStatus::Inactive,
         ("2 Science Park", "Cambridge", "CB4 0WS", "United Kingdom"), ("Peter Hall", "Head of Research", "peter.hall@northwind.example", "+44 1223 555 0103")),
    ];

    let now = Utc::now();
    rows.into_iter()
        .enumerate()
        .map(|(i, (name, entity_type, reg, employees, status, addr, contact))| {
            let created_at = now - Duration::days(30 * (i as i64 + 1));
            Entity {
                id: Uuid::new_v4(),
                name: name.to_string(),
                entity_type,
                registration_number: reg.to_string(),
                employee_count: employees,
                status,
                address: Address {
                    street: addr.0.to_string(),
                    city: addr.1.to_string(),
                    postal_code: addr.2.to_string(),
                    country: addr.3.to_string(),
                },
                contact_person: ContactPerson {
                    name: contact.0.to_string(),
                    position: contact.1.to_string(),
                    email: contact.2.to_string(),
                    phone: contact.3.to_string(),
                },
                created_at,
                updated_at: created_at + Duration::days(3),
            }
        })
        .collect()
}

pub fn sample_company() -> CompanyInfo {
    CompanyInfo {
        name: "Northwind Group".to_string(),
        description: "Holding company of the Northwind legal entities.".to_string(),
        industry: "Trading".to_string(),
        founded_year: 1987,
        website: "https://northwind.example".to_string(),
        headquarters: Address {
            street: "1 Harbour Way".to_string(),
            city: "Seattle".to_string(),
            postal_code: "98101".to_string(),
            country: "USA".to_string(),
        },
        contact_person: ContactPerson {
            name: "Laura Callahan".to_string(),
            position: "General Counsel".to_string(),
            email: "laura.callahan@northwind.example".to_string(),
            phone: "+1 206 555 0100".to_string(),
        },
        updated_at: Utc::now() - Duration::days(1),
    }
}
