//! Bundled sample species, offered when a search fails.

use serde_json::{json, Value};

/// Records in the same shape the explore stream produces.
pub fn sample_records() -> Vec<Value> {
    vec![
        json!({
            "Bengal Tiger": {
                "images": [
                    "https://upload.wikimedia.org/wikipedia/commons/5/56/Tiger.50.jpg"
                ],
                "wikipedia": "The Bengal tiger is a population of the Panthera tigris tigris subspecies and the nominate tiger subspecies. It ranks among the biggest wild cats alive today.",
                "inaturalist": {
                    "name": "Bengal Tiger",
                    "scientific_name": "Panthera tigris tigris",
                    "observations_count": 586,
                    "conservation_status": "Endangered",
                    "wikipedia_url": "https://en.wikipedia.org/wiki/Bengal_tiger"
                },
                "audio": []
            }
        }),
        json!({
            "Indian Peafowl": {
                "images": [
                    "https://upload.wikimedia.org/wikipedia/commons/0/05/Peacock_Plumage.jpg"
                ],
                "wikipedia": "The Indian peafowl is a peafowl species native to the Indian subcontinent. It is the national bird of India.",
                "inaturalist": {
                    "name": "Indian Peafowl",
                    "scientific_name": "Pavo cristatus",
                    "observations_count": 16207,
                    "conservation_status": "Least Concern",
                    "wikipedia_url": "https://en.wikipedia.org/wiki/Indian_peafowl"
                },
                "audio": [
                    {
                        "source": "Xeno-canto",
                        "id": "585406",
                        "url": "https://xeno-canto.org/585406/download",
                        "recordist": "Peter Boesman",
                        "country": "India",
                        "quality": "A"
                    }
                ]
            }
        }),
    ]
}
