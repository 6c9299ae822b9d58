use crate::domain::Provider;
use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen",
];
const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin",
];
const CREDENTIALS: &[&str] = &["MD", "DO", "NP", "PA", "DPM", "DC", "PhD", "DMD", "DDS", "OD"];
const SPECIALTIES: &[&str] = &[
    "Family Medicine", "Internal Medicine", "Cardiology", "Orthopedics", "Pediatrics",
    "Psychiatry", "Dermatology", "Neurology", "Oncology", "Emergency Medicine", "Radiology",
    "Anesthesiology", "Gastroenterology", "Pulmonology", "Nephrology",
];
const STATES: &[&str] = &["CA", "TX", "FL", "NY", "PA", "IL", "OH", "GA", "NC", "MI"];
const STREET_NAMES: &[&str] = &[
    "Main St", "Oak Ave", "Park Blvd", "Cedar Ln", "Maple Dr", "Washington St", "Lincoln Ave",
    "Jefferson Blvd", "Madison St", "Medical Center Dr",
];
const ORGANIZATIONS: &[&str] = &[
    "Medical Group", "Health Partners", "Clinic", "Medical Center", "Healthcare Associates",
    "Family Practice", "Specialty Care",
];

fn cities_for(state: &str) -> &'static [&'static str] {
    match state {
        "CA" => &["Los Angeles", "San Francisco", "San Diego", "Sacramento", "San Jose"],
        "TX" => &["Houston", "Dallas", "Austin", "San Antonio", "Fort Worth"],
        "FL" => &["Miami", "Orlando", "Tampa", "Jacksonville", "Fort Lauderdale"],
        "NY" => &["New York", "Buffalo", "Rochester", "Albany", "Syracuse"],
        "PA" => &["Philadelphia", "Pittsburgh", "Harrisburg", "Allentown", "Erie"],
        "IL" => &["Chicago", "Aurora", "Naperville", "Rockford", "Springfield"],
        "OH" => &["Columbus", "Cleveland", "Cincinnati", "Toledo", "Akron"],
        "GA" => &["Atlanta", "Augusta", "Savannah", "Columbus", "Macon"],
        "NC" => &["Charlotte", "Raleigh", "Greensboro", "Durham", "Winston-Salem"],
        "MI" => &["Detroit", "Grand Rapids", "Warren", "Sterling Heights", "Ann Arbor"],
        _ => &["Springfield"],
    }
}

fn generate_npi(rng: &mut impl Rng) -> String {
    let digits: String = (0..9).map(|_| rng.gen_range(0..10).to_string()).collect();
    format!("1{}", digits)
}

fn generate_phone(rng: &mut impl Rng) -> String {
    format!(
        "{}-{}-{}",
        rng.gen_range(100..1000),
        rng.gen_range(100..1000),
        rng.gen_range(1000..10000)
    )
}

fn generate_zip(rng: &mut impl Rng) -> String {
    rng.gen_range(10000..100000).to_string()
}

fn pick<'a>(rng: &mut impl Rng, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or("")
}

/// Generates one plausible provider record, then perturbs it with the data
/// issues the validation pipeline is built to catch.
pub fn synthetic_provider(rng: &mut impl Rng) -> Provider {
    let state = pick(rng, STATES);
    let city = pick(rng, cities_for(state));
    let first_name = pick(rng, FIRST_NAMES);
    let last_name = pick(rng, LAST_NAMES);
    let organization = pick(rng, ORGANIZATIONS);

    let mut provider = Provider::new(generate_npi(rng), first_name, last_name);
    provider.credential = Some(pick(rng, CREDENTIALS).to_string());
    provider.specialty = Some(pick(rng, SPECIALTIES).to_string());
    provider.phone = Some(generate_phone(rng));
    provider.fax = if rng.gen_bool(0.7) {
        Some(generate_phone(rng))
    } else {
        None
    };
    provider.email = Some(format!(
        "{}.{}@{}.com",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        organization.to_lowercase().replace(' ', "")
    ));
    provider.address_line1 = Some(format!(
        "{} {}",
        rng.gen_range(1000..10000),
        pick(rng, STREET_NAMES)
    ));
    provider.address_line2 = if rng.gen_bool(0.3) {
        Some(format!("Suite {}", rng.gen_range(100..600)))
    } else {
        None
    };
    provider.city = Some(city.to_string());
    provider.state = Some(state.to_string());
    provider.zip_code = Some(generate_zip(rng));
    provider.organization_name = Some(format!("{} {}", last_name, organization));
    provider.taxonomy_code = Some(format!(
        "207{}00000X",
        (b'A' + rng.gen_range(0..26u8)) as char
    ));
    provider.license_number = Some(format!("{}{}", state, rng.gen_range(100_000..1_000_000)));
    provider.license_state = Some(state.to_string());

    introduce_data_issues(&mut provider, rng);
    provider
}

/// Injects realistic defects with fixed probability bands so a seeded data
/// set exercises every validator branch.
fn introduce_data_issues(provider: &mut Provider, rng: &mut impl Rng) {
    let roll: f64 = rng.gen();

    if roll < 0.15 {
        provider.phone = provider.phone.as_ref().map(|p| p.replace('-', ""));
    } else if roll < 0.25 {
        provider.phone = Some("555-000-0000".to_string());
    }

    if roll > 0.7 && roll < 0.8 {
        provider.address_line1 = provider.address_line1.as_ref().map(|a| a.to_uppercase());
    }
    if roll > 0.8 && roll < 0.85 {
        provider.email = None;
    }
    if roll > 0.85 && roll < 0.9 {
        provider.zip_code = Some("00000".to_string());
    }
    if roll > 0.9 && roll < 0.95 {
        provider.specialty = None;
    }
}

/// Generates a batch of synthetic providers with the thread-local RNG.
pub fn generate_providers(count: usize) -> Vec<Provider> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| synthetic_provider(&mut rng)).collect()
}
