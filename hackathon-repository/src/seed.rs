//! Deterministic seed dataset used by the data import.
//!
//! Dates are relative to `today` so that the seeded events are open for
//! submissions at import time. Everything else is derived from row indexes,
//! so two imports on the same day produce identical tables.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use hackathon_shared::{
    Creates, Evaluates, HackathonEvent, Judge, Participant, Person, RelationalDataset,
    Registration, Sponsor, Submission, SubmissionType, Supports, Venue, Workshop,
};

const PARTICIPANT_COUNT: i32 = 15;
const JUDGE_COUNT: i32 = 5;
const EVENT_COUNT: i32 = 10;
const SUBMISSION_COUNT: i32 = 8;
/// Participants without a manager; the rest report to one of them.
const MANAGER_COUNT: i32 = 3;

const FIRST_NAMES: [&str; 20] = [
    "Alice", "Bruno", "Chiara", "Dmitri", "Elena", "Farid", "Greta", "Hiro", "Ines", "Jonas",
    "Keira", "Luca", "Maya", "Nikolai", "Olga", "Pavel", "Quinn", "Rosa", "Stefan", "Tamara",
];
const LAST_NAMES: [&str; 20] = [
    "Andersen", "Berger", "Costa", "Dvorak", "Eriksen", "Fischer", "Gomez", "Huber", "Ivanova",
    "Jansen", "Kowalski", "Lindqvist", "Moreau", "Novak", "Olsen", "Petrov", "Quint", "Rossi",
    "Schmid", "Tanaka",
];
const SHIRT_SIZES: [&str; 5] = ["S", "M", "L", "XL", "XXL"];
const DIETS: [Option<&str>; 4] = [None, Some("Vegetarian"), Some("Vegan"), Some("Gluten-free")];
const EXPERTISE: [&str; 5] = [
    "Machine Learning",
    "Web Development",
    "Cloud Infrastructure",
    "Cybersecurity",
    "Mobile Development",
];
const ORGANIZATIONS: [&str; 5] = [
    "TU Wien",
    "Fintech Labs",
    "Open Source Alliance",
    "Northern Robotics",
    "DataWorks",
];
const VENUES: [(&str, &str, i32, &str); 5] = [
    ("Innovation Hub", "Karlsplatz 13, 1040 Vienna", 200, "WiFi, Projectors, Kitchen"),
    ("Tech Campus Arena", "Lassallestrasse 5, 1020 Vienna", 350, "WiFi, Stage, Sleeping area"),
    ("Startup Loft", "Neubaugasse 25, 1070 Vienna", 120, "WiFi, Whiteboards"),
    ("University Hall", "Universitaetsring 1, 1010 Vienna", 500, "WiFi, Auditorium, Cafeteria"),
    ("Harbor Workspace", "Handelskai 94, 1200 Vienna", 150, "WiFi, Lounge, Parking"),
];
const EVENT_THEMES: [&str; 10] = [
    "Climate Tech", "FinTech", "HealthTech", "Smart City", "EdTech", "AI for Good", "Open Data",
    "Mobility", "Cyber Defense", "Space Apps",
];
const SPONSORS: [(&str, &str, &str, f64); 5] = [
    ("Nimbus Cloud", "Cloud Computing", "https://nimbus.example.com", 25000.00),
    ("Quanta Bank", "Finance", "https://quanta.example.com", 15000.00),
    ("GreenGrid Energy", "Energy", "https://greengrid.example.com", 10000.50),
    ("Pixel Forge", "Gaming", "https://pixelforge.example.com", 7500.00),
    ("MediCore", "Healthcare", "https://medicore.example.com", 12000.00),
];
const WORKSHOP_TOPICS: [(&str, &str); 4] = [
    ("Intro to Rust", "Ownership, borrowing and cargo basics"),
    ("Pitching Your Project", "Structuring a five-minute demo"),
    ("Cloud Deployment", "Shipping a prototype to production"),
    ("Data Visualization", "Telling stories with charts"),
];
const SKILL_LEVELS: [&str; 3] = ["Beginner", "Intermediate", "Advanced"];
const TICKET_TYPES: [&str; 4] = ["Early Bird", "Regular", "VIP", "Student"];
const TECH_STACKS: [&str; 4] = [
    "Rust, Axum, PostgreSQL",
    "Python, FastAPI, React",
    "TypeScript, Node.js, MongoDB",
    "Kotlin, Android, Firebase",
];
const FEEDBACK: [&str; 4] = [
    "Strong technical execution.",
    "Great idea, the demo needs polish.",
    "Excellent presentation and clear impact.",
    "Solid prototype with room to grow.",
];

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN))
}

fn pick<T: Copy>(items: &[T], index: i32) -> T {
    items[index.rem_euclid(items.len() as i32) as usize]
}

/// Events participant `person_id` registers for.
fn registered_events(person_id: i32) -> [i32; 2] {
    [
        (person_id - 1) % EVENT_COUNT + 1,
        (person_id + 2) % EVENT_COUNT + 1,
    ]
}

/// Build the seed dataset relative to `today`.
pub fn seed_dataset(today: NaiveDate) -> RelationalDataset {
    let mut dataset = RelationalDataset::default();

    for person_id in 1..=PARTICIPANT_COUNT + JUDGE_COUNT {
        let first = pick(&FIRST_NAMES, person_id - 1);
        let last = pick(&LAST_NAMES, person_id * 7);
        dataset.people.push(Person {
            person_id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!(
                "{}.{}{}@hackathon.example.com",
                first.to_lowercase(),
                last.to_lowercase(),
                person_id
            ),
            phone: Some(format!("+43 660 {:07}", 1_000_000 + person_id * 4_321)),
        });
    }

    for person_id in 1..=PARTICIPANT_COUNT {
        dataset.participants.push(Participant {
            person_id,
            registration_date: today - Duration::days(i64::from(30 + person_id)),
            t_shirt_size: Some(pick(&SHIRT_SIZES, person_id).to_string()),
            dietary_restrictions: pick(&DIETS, person_id).map(str::to_string),
            manager_id: (person_id > MANAGER_COUNT)
                .then(|| (person_id - MANAGER_COUNT - 1) % MANAGER_COUNT + 1),
        });
    }

    for offset in 0..JUDGE_COUNT {
        dataset.judges.push(Judge {
            person_id: PARTICIPANT_COUNT + 1 + offset,
            expertise_area: Some(pick(&EXPERTISE, offset).to_string()),
            years_experience: Some(5 + offset * 3),
            organization: Some(pick(&ORGANIZATIONS, offset).to_string()),
        });
    }

    for (index, (name, address, capacity, facilities)) in VENUES.iter().enumerate() {
        dataset.venues.push(Venue {
            venue_id: index as i32 + 1,
            name: name.to_string(),
            address: address.to_string(),
            capacity: *capacity,
            facilities: Some(facilities.to_string()),
        });
    }

    for index in 0..EVENT_COUNT {
        let start_date = today + Duration::days(i64::from(index * 30));
        dataset.events.push(HackathonEvent {
            event_id: index + 1,
            name: format!("{} Hackathon {}", pick(&EVENT_THEMES, index), start_date.format("%Y")),
            start_date,
            end_date: start_date + Duration::days(i64::from(2 + index % 4)),
            event_type: Some("Hackathon".to_string()),
            max_participants: Some(50 + index * 10),
            venue_id: Some(index % VENUES.len() as i32 + 1),
        });
    }

    for (index, (company, industry, website, amount)) in SPONSORS.iter().enumerate() {
        let sponsor_id = index as i32 + 1;
        dataset.sponsors.push(Sponsor {
            sponsor_id,
            company_name: company.to_string(),
            industry: Some(industry.to_string()),
            website: Some(website.to_string()),
            contribution_amount: Some(*amount),
        });
        dataset.supports.push(Supports {
            sponsor_id,
            event_id: sponsor_id,
        });
        if sponsor_id % 2 == 1 {
            dataset.supports.push(Supports {
                sponsor_id,
                event_id: sponsor_id + 5,
            });
        }
    }

    for event in &dataset.events {
        let count = 2 + event.event_id % 2;
        for workshop_number in 1..=count {
            let (title, description) = pick(&WORKSHOP_TOPICS, event.event_id + workshop_number);
            dataset.workshops.push(Workshop {
                workshop_number,
                event_id: event.event_id,
                title: title.to_string(),
                description: Some(description.to_string()),
                duration: Some(45 + 15 * (workshop_number % 4)),
                skill_level: Some(pick(&SKILL_LEVELS, event.event_id + workshop_number).to_string()),
                max_attendees: Some(20 + 5 * workshop_number),
            });
        }
    }

    for person_id in 1..=PARTICIPANT_COUNT {
        for event_id in registered_events(person_id) {
            let event_start = dataset.events[(event_id - 1) as usize].start_date;
            let payment_status = if (person_id + event_id) % 3 == 0 {
                "pending"
            } else {
                "completed"
            };
            dataset.registrations.push(Registration {
                person_id,
                event_id,
                registration_number: format!("REG-{}-{:03}", event_id, person_id),
                registration_timestamp: at(event_start - Duration::days(14), 9, person_id as u32),
                payment_status: Some(payment_status.to_string()),
                ticket_type: Some(pick(&TICKET_TYPES, person_id + event_id).to_string()),
            });
        }
    }

    for submission_id in 1..=SUBMISSION_COUNT {
        let event = &dataset.events[((submission_id - 1) % EVENT_COUNT) as usize];
        let submission_type = if submission_id % 2 == 1 {
            SubmissionType::Individual
        } else {
            SubmissionType::Team
        };

        let mut registered: Vec<i32> = dataset
            .registrations
            .iter()
            .filter(|r| r.event_id == event.event_id)
            .map(|r| r.person_id)
            .collect();
        registered.sort_unstable();
        let team_size = match submission_type {
            SubmissionType::Individual => 1,
            SubmissionType::Team => 2 + (submission_id / 2) as usize % 2,
        };

        dataset.submissions.push(Submission {
            submission_id,
            event_id: event.event_id,
            project_name: format!("{} Project {}", pick(&EVENT_THEMES, submission_id - 1), submission_id),
            description: Some(format!(
                "Prototype built during {} by a {} entry.",
                event.name, submission_type
            )),
            submission_time: at(event.start_date + Duration::days(1), 10 + submission_id as u32, 0),
            technology_stack: Some(pick(&TECH_STACKS, submission_id).to_string()),
            repository_url: Some(format!("https://github.com/hackathon/project-{}", submission_id)),
            submission_type: Some(submission_type.to_string()),
        });

        for person_id in registered.into_iter().take(team_size) {
            dataset.creates.push(Creates {
                person_id,
                submission_id,
            });
        }
    }

    for offset in 0..JUDGE_COUNT {
        let person_id = PARTICIPANT_COUNT + 1 + offset;
        let evaluations = 2 + offset % 3;
        for k in 0..evaluations {
            let submission_id = (offset + k) % SUBMISSION_COUNT + 1;
            dataset.evaluates.push(Evaluates {
                person_id,
                submission_id,
                score: Some(6.0 + f64::from((person_id * 7 + k * 3) % 40) / 10.0),
                feedback: Some(pick(&FEEDBACK, person_id + k).to_string()),
            });
        }
    }

    dataset
}
