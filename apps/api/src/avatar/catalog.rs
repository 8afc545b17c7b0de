//! Static avatar catalog. The 100 illustrations live at
//! `/avatars/{NNN}.svg`; the descriptions below exist only as prompt context
//! for the selector model.

pub const AVATAR_COUNT: u32 = 100;

/// One short description per illustration, in index order (001–100).
pub const AVATAR_DESCRIPTIONS: [&str; 99] = [
    "Focused developer with round glasses typing on a laptop",
    "Smiling woman with a teal hoodie and headphones",
    "Bearded man in a flannel shirt holding a coffee mug",
    "Designer with a beret sketching on a tablet",
    "Young man with curly hair and a backpack",
    "Woman with a bun and bold red glasses",
    "Engineer in a hard hat reviewing blueprints",
    "Scientist in a lab coat holding a flask",
    "Presenter gesturing at a whiteboard of charts",
    "Cheerful barista-style figure with an apron",
    "Woman with long braids and a yellow scarf",
    "Man in a suit with a confident smile",
    "Student with oversized headphones and a notebook",
    "Photographer holding a vintage camera",
    "Runner in athletic wear mid-stride",
    "Gamer with a neon headset and controller",
    "Writer at a typewriter with scattered pages",
    "Musician with an acoustic guitar",
    "Chef tossing vegetables in a pan",
    "Gardener with a straw hat and watering can",
    "Architect holding a rolled-up drawing",
    "Woman in a wheelchair at a standing desk",
    "Pilot with aviator sunglasses",
    "Doctor with a stethoscope and clipboard",
    "Teacher pointing at a chalkboard",
    "Astronaut with a reflective visor",
    "Cyclist with a messenger bag",
    "Painter with a palette and brush",
    "Man with locs and a denim jacket",
    "Woman in a hijab working on a laptop",
    "Climber with a rope coil over one shoulder",
    "Analyst studying a wall of sticky notes",
    "Speaker at a podium with a microphone",
    "Dancer mid-spin in flowing clothes",
    "Robot-builder with a soldering iron",
    "Librarian carrying a stack of books",
    "Skateboarder with a beanie",
    "Mountain hiker with trekking poles",
    "Barista pouring latte art",
    "Woman with short silver hair and a blazer",
    "Man with a ponytail and wireframe glasses",
    "Illustrator with a stylus behind one ear",
    "Drummer surrounded by cymbals",
    "Sailor at a ship's wheel",
    "Florist arranging a bouquet",
    "Weightlifter chalking their hands",
    "Chess player contemplating a move",
    "Film director with a clapperboard",
    "Beekeeper in a mesh veil",
    "Surfer carrying a longboard",
    "Woman with freckles and a polka-dot dress",
    "Man in a turtleneck holding a smartphone",
    "Violinist mid-bow stroke",
    "Carpenter with a pencil tucked over an ear",
    "Meteorologist in front of a weather map",
    "Juggler with three bright balls",
    "Fencer holding a mask underarm",
    "Potter shaping clay at a wheel",
    "Woman with a high ponytail and gym bag",
    "Man with a bow tie and suspenders",
    "Snowboarder with tinted goggles",
    "Radio host leaning into a microphone",
    "Translator flipping through a dictionary",
    "Barber with scissors and a comb",
    "Park ranger with binoculars",
    "Woman with curly red hair and overalls",
    "Man in a wheelchair holding a trophy",
    "Magician fanning a deck of cards",
    "Firefighter with a helmet under one arm",
    "Zookeeper with a parrot on the shoulder",
    "Woman in a sari holding a tablet",
    "Streamer with a ring light glow",
    "Mechanic wiping hands on a rag",
    "Diver with a mask pushed up on the forehead",
    "Economist tracing a rising graph",
    "Man with a shaved head and bright sneakers",
    "Woman knitting with a cat on her lap",
    "Courier balancing pizza boxes",
    "Judge with small round spectacles",
    "Tattoo artist with inked forearms",
    "Ballerina tying pointe shoes",
    "Geologist holding a split rock",
    "Man with a mustache and a bowler hat",
    "Woman with a prosthetic arm waving hello",
    "Kayaker with a dripping paddle",
    "Sommelier studying a glass of wine",
    "Falconer with a perched hawk",
    "Woman with a pixie cut and leather jacket",
    "Puzzle-solver at a half-done jigsaw",
    "Man asleep on a pile of textbooks",
    "Clockmaker peering through a loupe",
    "Woman stargazing with a telescope",
    "Comic with a microphone and wide grin",
    "Blacksmith striking a glowing bar",
    "Woman in rain boots jumping a puddle",
    "Man with a parrot-green mohawk",
    "Origami artist folding a paper crane",
    "Lighthouse keeper with a lantern",
    "Robot with a friendly antenna wave",
];

/// Renders the catalog as numbered prompt context (`001: …` through `100: …`).
pub fn catalog_listing() -> String {
    AVATAR_DESCRIPTIONS
        .iter()
        .enumerate()
        .map(|(i, desc)| format!("{:03}: {desc}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_all_hundred() {
        assert_eq!(AVATAR_DESCRIPTIONS.len(), AVATAR_COUNT as usize);
        let listing = catalog_listing();
        assert!(listing.starts_with("001: "));
        assert!(listing.contains("\n100: "));
    }
}
