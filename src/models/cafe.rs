use serde::{Deserialize, Serialize};

/// One cafe listing. `id` is assigned by the store on insert and never
/// changes afterwards; `name` is unique across all records.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Cafe {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// Insert input: everything except the id, which the store assigns.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

impl NewCafe {
    pub fn with_id(self, id: i64) -> Cafe {
        Cafe {
            id,
            name: self.name,
            map_url: self.map_url,
            img_url: self.img_url,
            location: self.location,
            seats: self.seats,
            has_toilet: self.has_toilet,
            has_wifi: self.has_wifi,
            has_sockets: self.has_sockets,
            can_take_calls: self.can_take_calls,
            coffee_price: self.coffee_price,
        }
    }
}

/// Coerces the form's amenity flags from text. The literal `"yes"` in any
/// casing means true; every other value (including empty) means false.
/// All creation paths must go through this one function.
pub fn yes_to_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::yes_to_bool;

    #[test]
    fn yes_is_case_insensitive() {
        assert!(yes_to_bool("yes"));
        assert!(yes_to_bool("Yes"));
        assert!(yes_to_bool("YES"));
        assert!(yes_to_bool("yEs"));
    }

    #[test]
    fn anything_else_is_false() {
        assert!(!yes_to_bool("no"));
        assert!(!yes_to_bool("true"));
        assert!(!yes_to_bool("1"));
        assert!(!yes_to_bool(""));
        assert!(!yes_to_bool(" yes"));
    }
}
