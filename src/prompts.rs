//! Prompt builder: the three fixed natural-language templates
//!
//! Pure template functions with verbatim substitution. Inputs are not
//! validated or escaped before interpolation, so attacker-controlled form
//! fields are a prompt-injection surface at this boundary.

/// Prompt asking the model to rank candidate cities for the traveler
#[must_use]
pub fn rank_cities_prompt(origin: &str, cities: &[String], interests: &str, date_range: &str) -> String {
    format!(
        "You are a travel expert. Based on the following details, rank the candidate cities:\n\
         \n\
         Origin: {origin}\n\
         Candidate Cities: {cities}\n\
         Traveler Interests: {interests}\n\
         Date Range: {date_range}\n\
         \n\
         Provide a ranked list of cities with a short explanation for each ranking.\n\
         Use clean formatting with bold section titles, but DO NOT wrap text in asterisks.",
        cities = cities.join(", "),
    )
}

/// Prompt producing the full day-by-day itinerary.
///
/// Built from the *selected* cities only; the custom city is covered by the
/// per-city briefings but intentionally not by the itinerary.
#[must_use]
pub fn itinerary_prompt(
    origin: &str,
    selected_cities: &[String],
    interests: &str,
    date_range: &str,
) -> String {
    format!(
        "You are an expert travel planner. Create a detailed **7-day itinerary**.\n\
         \n\
         Origin: {origin}\n\
         Destination City: {cities}\n\
         Traveler Interests: {interests}\n\
         Date Range: {date_range}\n\
         \n\
         STRICT REQUIREMENTS:\n\
         - Write ONLY one cleanly formatted day-by-day itinerary first.\n\
         - Do NOT include any budget inside daily schedules.\n\
         - Each day must include clearly labeled sections:\n\
         \x20   Morning: activity + notes\n\
         \x20   Afternoon: activity + notes\n\
         \x20   Lunch: recommend a restaurant\n\
         \x20   Evening: activity + notes\n\
         \x20   Dinner: recommend a restaurant\n\
         \x20   Night Stay: recommend a hotel\n\
         - Use plain bold titles like Morning:, Afternoon:, etc. (no asterisks).\n\
         - Keep activities realistic and geographically consistent.\n\
         - Include local food and cultural experiences daily.\n\
         - Provide short justifications only for key recommendations.\n\
         \n\
         Important: The \"Estimated Budget\" section must come ONLY AFTER all 7 days are completed.\n\
         - Absolutely NO budget lines should appear inside Day 1-7.\n\
         - The final \"Estimated Budget\" block should appear once, at the very end.\n\
         \n\
         Output format:\n\
         \n\
         Day 1:\n\
         Morning: ...\n\
         Afternoon: ...\n\
         Lunch: ...\n\
         Evening: ...\n\
         Dinner: ...\n\
         Night Stay: ...\n\
         \n\
         Day 2:\n\
         ...\n\
         \n\
         Day 7:\n\
         ...\n\
         \n\
         Estimated Budget:\n\
         Flights: ...\n\
         Hotels: ...\n\
         Food: ...\n\
         Activities: ...\n\
         Transport: ...",
        cities = selected_cities.join(", "),
    )
}

/// Prompt producing a short briefing for one city
#[must_use]
pub fn city_info_prompt(city: &str, interests: &str, date_range: &str) -> String {
    format!(
        "For {city} (dates: {date_range}), give:\n\
         - Top attractions\n\
         - Best food picks\n\
         - Safety tips tailored to {interests}\n\
         \n\
         Use bold text for section titles, no asterisks."
    )
}
