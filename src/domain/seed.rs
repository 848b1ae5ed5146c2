//! Initial catalog data carried over from the Level-Up Gamer web store.
//!
//! Products are created with identity 0 so the catalog store assigns the
//! surrogate key, and with zeroed aggregates: ratings come from the seed
//! reviews through the review ledger, keeping the recompute invariant.

use uuid::Uuid;

use crate::domain::{NewReview, Product, ProductCategory};

fn product(
    code: &str,
    name: &str,
    description: &str,
    price: f64,
    image_ref: &str,
    category: ProductCategory,
    stock: u32,
) -> Product {
    Product {
        id: 0,
        code: code.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        image_ref: image_ref.to_string(),
        category,
        stock,
        average_rating: 0.0,
        review_count: 0,
    }
}

/// The ten launch products of the web catalog
pub fn initial_products() -> Vec<Product> {
    vec![
        product(
            "LL001",
            "Random Steam Key",
            "A unique letter-and-number code that activates and unlocks a game or software on your Steam account.",
            29_990.0,
            "steam_key",
            ProductCategory::SteamKeys,
            50,
        ),
        product(
            "JM002",
            "Monopoly",
            "The classic board game of buying, selling and trading properties until your opponents go bankrupt.",
            24_990.0,
            "monopoly",
            ProductCategory::BoardGames,
            15,
        ),
        product(
            "AC001",
            "Xbox Series X Wireless Controller",
            "Comfortable play with mappable buttons and improved haptic response.",
            59_990.0,
            "xbox_controller",
            ProductCategory::Accessories,
            20,
        ),
        product(
            "AC002",
            "HyperX Cloud II Gaming Headset",
            "Quality surround sound with detachable microphone and memory-foam ear pads.",
            79_990.0,
            "hyperx_headset",
            ProductCategory::Accessories,
            12,
        ),
        product(
            "CO001",
            "PlayStation 5",
            "Sony's latest-generation console with stunning graphics and ultra-fast load times.",
            549_990.0,
            "playstation5",
            ProductCategory::Consoles,
            5,
        ),
        product(
            "CG001",
            "ASUS ROG Strix Gaming PC",
            "A powerful build for demanding gamers with the latest components.",
            1_299_990.0,
            "asus_rog_pc",
            ProductCategory::GamingPcs,
            3,
        ),
        product(
            "SG001",
            "Secretlab Titan Gaming Chair",
            "Built for maximum comfort with ergonomic support and adjustable fit.",
            349_990.0,
            "secretlab_chair",
            ProductCategory::GamingChairs,
            8,
        ),
        product(
            "MS001",
            "Logitech G502 HERO Gaming Mouse",
            "High-precision sensor and customizable buttons for exact control.",
            49_990.0,
            "logitech_mouse",
            ProductCategory::Mice,
            25,
        ),
        product(
            "MP001",
            "Razer Goliathus Extended Chroma Mousepad",
            "A wide play surface with customizable RGB lighting.",
            29_990.0,
            "razer_mousepad",
            ProductCategory::MousePads,
            30,
        ),
        product(
            "PP001",
            "Level-Up Custom Gamer Tee",
            "A comfortable shirt you can personalize with your gamer tag or favorite design.",
            14_990.0,
            "levelup_tee",
            ProductCategory::CustomTees,
            40,
        ),
    ]
}

fn review(product_code: &str, user_name: &str, rating: u8, comment: &str) -> NewReview {
    NewReview {
        product_code: product_code.to_string(),
        user_id: Uuid::new_v4(),
        user_name: user_name.to_string(),
        rating,
        comment: comment.to_string(),
    }
}

/// Community reviews shipped with the launch catalog, one demo reviewer each
pub fn initial_reviews() -> Vec<NewReview> {
    vec![
        review("LL001", "GamerPro", 5, "Excellent key, I got an amazing game. Totally recommended."),
        review("LL001", "PlayerX", 4, "Good service, the key arrived fast."),
        review("LL001", "SteamLover", 5, "I got a game straight off my wishlist, incredible!"),
        review("JM002", "BoardGamer", 5, "The classic Monopoly, arrived well packaged and in perfect shape."),
        review("JM002", "FamilyGamer", 5, "Perfect for family nights, complete edition in excellent condition."),
        review("AC001", "XboxFan", 5, "Original controller, works perfectly. Connectivity is excellent."),
        review("AC001", "ConsoleGamer", 4, "Very good controller, battery lasts quite a while. Recommended."),
        review("AC001", "ProPlayer", 5, "Ideal for competitive play, instant response."),
        review("AC002", "AudioPhile", 5, "Spectacular sound, comfortable even in long sessions."),
        review("AC002", "StreamerPro", 5, "The microphone quality is excellent, perfect for streaming."),
        review("AC002", "GamerCL", 4, "Great headset, only nitpick is that it is a bit heavy."),
        review("CO001", "PSFanatic", 5, "Best console I have owned, the graphics are stunning!"),
        review("CO001", "NextGen", 5, "Super fast loading, no more waiting around. Worth every peso."),
        review("CO001", "Gamer2025", 4, "Excellent console, though hard to find. Arrived well packaged."),
        review("CO001", "VideoGames", 5, "The DualSense is a marvel, a one-of-a-kind experience."),
    ]
}
