pub const BUSINESS_NAME: &str = "Aama Daycare";

pub const TELEPHONE_URI: &str = "tel:5107783220";
pub const MAILTO_URI: &str = "mailto:aamadaycare@gmail.com";
pub const DIRECTIONS_URL: &str =
    "https://www.google.com/maps/dir/?api=1&destination=737+Birdwood+Ct,+San+Ramon,+CA,+94582";
pub const MAP_PLACE_URL: &str =
    "https://www.google.com/maps/place/737+Birdwood+Ct,+San+Ramon,+CA+94582";

pub const YELP_BUSINESS_ID: &str = "aama-day-care-san-ramon-2";
pub const YELP_LISTING_URL: &str = "https://www.yelp.com/biz/aama-day-care-san-ramon-2";
