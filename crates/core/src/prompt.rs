use crate::chat::ChatMessage;
use crate::models::TripRequest;

pub const SYSTEM_INSTRUCTION: &str = r#"You are an expert travel itinerary planner. Your job is to generate a well-structured, engaging, and visually appealing travel itinerary for a user based on their preferences.

### Guidelines for Itinerary Generation
- No Transportation Details 🚫 : Do not mention flights, trains, buses, or any transport mode.
- Daily Breakdown : Each day should be written in paragraph form, describing the experience in a flowing, engaging manner.
- Balanced Schedule : Ensure a mix of sightseeing, relaxation, cultural activities, and meals.
- Personalization : Tailor the itinerary to match the user's interests, budget, and dietary preferences.
- Local Experience : Recommend hidden gems, cultural experiences, and authentic local dining spots.

### Itinerary Format
Day 1: [Title]
🌞 Morning : [Describe activities in an engaging way, e.g., "Start your day with a visit to..."].
🌅 Afternoon : [Describe afternoon activities with immersive details].
🌙 Evening : [Describe the evening experience, ensuring a balance of relaxation and fun].

Day 2: [Title]
🌞 Morning : [Activity description]
🌅 Afternoon : [Activity description]
🌙 Evening : [Activity description]

Final Notes 📝
- Provide essential travel tips.
- Mention any local phrases that might help.
- Recommend packing tips and cultural etiquette.
- End with a warm, engaging farewell message.

Ensure the text flows naturally, creating an immersive experience for the traveler! 🚀"#;

pub fn build_user_instruction(request: &TripRequest) -> String {
    format!(
        "Generate a detailed travel itinerary for a trip with the following details:\n\
         \n\
         - Source City: {source}\n\
         - Destination: {destination}\n\
         - Travel Dates: {start} to {end}\n\
         - Budget: {budget} budget\n\
         - Meal Preferences: {meal}\n\
         - Interests: {interest}\n\
         - Special Requirements: {special}\n\
         \n\
         Ensure each day has different activities, covering the user's interests.\n\
         No transportation details should be included. Only list activities.",
        source = request.source,
        destination = request.destination,
        start = request.start_date.format("%Y-%m-%d"),
        end = request.end_date.format("%Y-%m-%d"),
        budget = request.budget,
        meal = request.meal_preference.label(),
        interest = request.interest.label(),
        special = request.special_requirements_or_none(),
    )
}

/// System instruction first, user instruction second.
pub fn build_itinerary_messages(request: &TripRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_INSTRUCTION),
        ChatMessage::user(build_user_instruction(request)),
    ]
}
