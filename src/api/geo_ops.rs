use crate::core::codec::decode;
use crate::core::distance::{distance, geodesic_distance};
use crate::util::error::DigipinError;

/// Haversine distance in meters between the centers of two DIGIPIN cells.
///
/// # Example
/// ```
/// use digipin_rs::distance_between_codes;
///
/// let d = distance_between_codes("39J-438-TJC7", "4FK-595-8823").unwrap();
/// assert_eq!(d.round(), 1148096.0);
/// ```
pub fn distance_between_codes(a: &str, b: &str) -> Result<f64, DigipinError> {
    let a = decode(a)?;
    let b = decode(b)?;
    Ok(distance(a, b))
}

/// Ellipsoidal (WGS84 geodesic) distance in meters between two DIGIPIN cell centers.
pub fn precise_distance_between_codes(a: &str, b: &str) -> Result<f64, DigipinError> {
    let a = decode(a)?;
    let b = decode(b)?;
    Ok(geodesic_distance(a, b))
}

/// Sorts `codes` by ascending distance from `reference`.
///
/// Every code is validated before any distance is computed; the first invalid
/// one aborts the call. Equal distances keep their input order.
///
/// # Example
/// ```
/// use digipin_rs::order_by_distance;
///
/// let ordered = order_by_distance("39J-438-TJC7", &["4PJ-766-C924", "4FK-595-8823"]).unwrap();
/// assert_eq!(ordered, vec!["4FK-595-8823", "4PJ-766-C924"]);
/// ```
pub fn order_by_distance<S: AsRef<str>>(
    reference: &str,
    codes: &[S],
) -> Result<Vec<String>, DigipinError> {
    let origin = decode(reference)?;

    let mut ranked = codes
        .iter()
        .map(|code| {
            let code = code.as_ref();
            decode(code).map(|coord| (code, distance(origin, coord)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // sort_by is stable, ties stay in input order
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    Ok(ranked
        .into_iter()
        .map(|(code, _)| code.to_string())
        .collect())
}

/// Returns the code in `codes` closest to `reference`.
///
/// # Errors
///
/// [`DigipinError::EmptyInput`] when `codes` is empty, otherwise any
/// validation error from [`order_by_distance`].
pub fn find_nearest<S: AsRef<str>>(reference: &str, codes: &[S]) -> Result<String, DigipinError> {
    order_by_distance(reference, codes)?
        .into_iter()
        .next()
        .ok_or(DigipinError::EmptyInput)
}
