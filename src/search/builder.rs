use crate::error::SearchError;
use crate::models::SearchPreferences;
use crate::search::types::SearchRequest;
use std::fmt::Write;

const PROVIDER_BASE_URL: &str = "https://www.airbnb.com/s/";
const PETS_FILTER_MARKER: &str = "selected_filter_order%5B%5D=pets%3A1";

/// Builds the provider search request from user preferences.
///
/// Only an empty `location` is rejected. Optional dates, prices and guest counts are
/// left out of the URL when unset or zero; adults, bedrooms and bathrooms are always
/// present. Amenity codes follow the fixed vocabulary order, so the same preferences
/// always produce the same URL.
pub fn build(prefs: &SearchPreferences) -> Result<SearchRequest, SearchError> {
    let location = prefs.location.trim();
    if location.is_empty() {
        return Err(SearchError::Validation { field: "location" });
    }

    Ok(SearchRequest {
        query: provider_url(location, prefs),
        user_pref: prefs.clone(),
    })
}

fn provider_url(location: &str, prefs: &SearchPreferences) -> String {
    let mut url = format!(
        "{PROVIDER_BASE_URL}{}/homes?tab_id=home_tab&refinement_paths%5B%5D=%2Fhomes\
         &price_filter_input_type=2&channel=EXPLORE&date_picker_type=calendar",
        urlencoding::encode(location)
    );

    // Writing into a String cannot fail
    if let Some(check_in) = prefs.check_in {
        let _ = write!(url, "&checkin={}", check_in.format("%Y-%m-%d"));
    }
    if let Some(check_out) = prefs.check_out {
        let _ = write!(url, "&checkout={}", check_out.format("%Y-%m-%d"));
    }

    let guests = &prefs.guests;
    let _ = write!(url, "&adults={}", guests.adults);
    push_nonzero(&mut url, "children", guests.children);
    push_nonzero(&mut url, "infants", guests.infants);
    push_nonzero(&mut url, "pets", guests.pets);

    url.push_str("&source=structured_search_input_header&search_type=filter_change&search_mode=regular_search");

    push_nonzero(&mut url, "price_min", prefs.price_min.unwrap_or(0));
    push_nonzero(&mut url, "price_max", prefs.price_max.unwrap_or(0));

    let _ = write!(
        url,
        "&min_bedrooms={}&min_bathrooms={}",
        prefs.bedrooms, prefs.bathrooms
    );

    for amenity in prefs.known_amenities() {
        let _ = write!(url, "&amenities%5B%5D={}", amenity.code());
    }

    if guests.pets > 0 {
        url.push('&');
        url.push_str(PETS_FILTER_MARKER);
    }

    url
}

fn push_nonzero(url: &mut String, name: &str, value: u32) {
    if value > 0 {
        let _ = write!(url, "&{name}={value}");
    }
}
