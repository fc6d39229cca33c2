//! # Round-Trip Properties
//!
//! For generated messages of each registered kind:
//! - `loads(dumps(m)) == m` with validation off,
//! - `dumps` leaves `m` untouched,
//! - re-serializing a parsed message yields the same text.

use cdm_codec::{Codec, Validation};
use cdm_core::Message;
use cdm_messages::{
    AltAzTarget, AssignResourcesRequest, CommonConfiguration, ConfigureRequest, CspConfiguration, DishAllocation,
    DishConfiguration, LowAssignResourcesRequest, MccsAllocation, PointingConfiguration, PointingCorrection,
    ReceiverBand, ReleaseResourcesRequest, ScanRequest, SpecialTarget, SubarrayBeamTarget, Target,
    TmcConfiguration,
};
use chrono::Duration;
use proptest::prelude::*;

const ASSIGN_2_1: &str = "https://schema.skao.int/ska-tmc-assignresources/2.1";
const RELEASE_2_1: &str = "https://schema.skao.int/ska-tmc-releaseresources/2.1";
const SCAN_2_1: &str = "https://schema.skao.int/ska-tmc-scan/2.1";
const CONFIGURE_2_3: &str = "https://schema.skao.int/ska-tmc-configure/2.3";
const CSP_1_0: &str = "https://schema.skao.int/ska-csp-configure/1.0";
const CSP_2_0: &str = "https://schema.skao.int/ska-csp-configure/2.0";

fn check_round_trip<M: Message>(codec: &Codec, message: &M) -> Result<(), TestCaseError> {
    let snapshot = message.clone();
    let text = codec.dumps_with(message, Validation::disabled()).unwrap();
    prop_assert_eq!(message, &snapshot);

    let back: M = codec.loads_with(&text, Validation::disabled()).unwrap();
    prop_assert_eq!(&back, message);

    let again = codec.dumps_with(&back, Validation::disabled()).unwrap();
    prop_assert_eq!(again, text);
    Ok(())
}

// =========================================================================
// Strategies
// =========================================================================

fn interface(uri: &'static str) -> impl Strategy<Value = Option<String>> {
    prop::option::of(Just(uri.to_string()))
}

fn receptor_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("SKA[0-9]{3}", 0..6)
}

fn duration() -> impl Strategy<Value = Duration> {
    (0i64..1_000_000_000_000).prop_map(Duration::microseconds)
}

fn band() -> impl Strategy<Value = ReceiverBand> {
    prop_oneof![
        Just(ReceiverBand::Band1),
        Just(ReceiverBand::Band2),
        Just(ReceiverBand::Band3),
        Just(ReceiverBand::Band4),
        Just(ReceiverBand::Band5a),
        Just(ReceiverBand::Band5b),
    ]
}

fn target() -> impl Strategy<Value = Target> {
    prop_oneof![
        ("[A-Za-z0-9 ]{0,12}", "[0-9]{2}:[0-9]{2}:[0-9]{2}", "-?[0-9]{2}:[0-9]{2}:[0-9]{2}")
            .prop_map(|(name, ra, dec)| Target::icrs(name, ra, dec)),
        ("[A-Za-z]{0,8}", -360.0f64..360.0, 0.0f64..90.0).prop_map(|(target_name, az, el)| {
            Target::AltAz(AltAzTarget { target_name, az, el })
        }),
        prop_oneof![Just("Sun"), Just("Moon"), Just("Jupiter")].prop_map(|name| {
            Target::Special(SpecialTarget {
                target_name: name.to_string(),
            })
        }),
    ]
}

fn correction() -> impl Strategy<Value = Option<PointingCorrection>> {
    prop::option::of(prop_oneof![
        Just(PointingCorrection::Maintain),
        Just(PointingCorrection::Update),
        Just(PointingCorrection::Reset),
    ])
}

fn csp() -> impl Strategy<Value = CspConfiguration> {
    (prop_oneof![Just(None), Just(Some(CSP_1_0)), Just(Some(CSP_2_0))], band(), "[a-z0-9-]{1,20}").prop_map(
        |(interface, band, config_id)| CspConfiguration {
            interface: interface.map(str::to_string),
            common: Some(CommonConfiguration::new(config_id, band)),
            ..CspConfiguration::default()
        },
    )
}

// =========================================================================
// Fixed cases
// =========================================================================

#[test]
fn float_coordinates_round_trip_exactly() {
    let codec = Codec::embedded_ignoring_env().unwrap();
    let request = ConfigureRequest {
        pointing: Some(PointingConfiguration {
            target: Some(Target::AltAz(AltAzTarget {
                target_name: String::new(),
                az: 0.0,
                el: 1.1106578198532013,
            })),
            correction: None,
        }),
        ..ConfigureRequest::default()
    };
    let text = codec.dumps_with(&request, Validation::disabled()).unwrap();
    assert!(text.contains("1.1106578198532013"), "{text}");
    let back: ConfigureRequest = codec.loads_with(&text, Validation::disabled()).unwrap();
    assert_eq!(back, request);

    let beam = SubarrayBeamTarget::new("icrs", 1.1106578198532013, -0.30000000000000004);
    let back: SubarrayBeamTarget = serde_json::from_str(&serde_json::to_string(&beam).unwrap()).unwrap();
    assert_eq!(back, beam);
}

// =========================================================================
// Properties
// =========================================================================

proptest! {
    #[test]
    fn assign_resources_round_trips(
        interface in interface(ASSIGN_2_1),
        subarray_id in 1u8..=16,
        receptors in receptor_ids(),
    ) {
        let codec = Codec::embedded_ignoring_env().unwrap();
        let mut request = AssignResourcesRequest::new(subarray_id, DishAllocation::new(receptors)).unwrap();
        request.interface = interface;
        check_round_trip(&codec, &request)?;
    }

    #[test]
    fn release_resources_round_trips(
        interface in interface(RELEASE_2_1),
        subarray_id in 1u8..=16,
        release_all in any::<bool>(),
        receptors in receptor_ids(),
    ) {
        let codec = Codec::embedded_ignoring_env().unwrap();
        let dish = (!release_all).then(|| DishAllocation::new(receptors));
        let mut request = ReleaseResourcesRequest::new(subarray_id, release_all, dish).unwrap();
        request.interface = interface;
        check_round_trip(&codec, &request)?;
    }

    #[test]
    fn scan_round_trips(
        interface in interface(SCAN_2_1),
        scan_id in prop::option::of(0u64..1_000_000),
        scan_duration in prop::option::of(duration()),
    ) {
        let codec = Codec::embedded_ignoring_env().unwrap();
        let request = ScanRequest { interface, transaction_id: None, scan_id, scan_duration };
        check_round_trip(&codec, &request)?;
    }

    #[test]
    fn configure_round_trips(
        interface in interface(CONFIGURE_2_3),
        target in prop::option::of(target()),
        correction in correction(),
        receiver_band in band(),
        csp in prop::option::of(csp()),
        scan_duration in duration(),
        partial_configuration in any::<bool>(),
    ) {
        let codec = Codec::embedded_ignoring_env().unwrap();
        let request = ConfigureRequest {
            interface,
            pointing: Some(PointingConfiguration { target, correction }),
            dish: Some(DishConfiguration { receiver_band }),
            csp,
            tmc: Some(TmcConfiguration { scan_duration: Some(scan_duration), partial_configuration }),
            ..ConfigureRequest::default()
        };
        check_round_trip(&codec, &request)?;
    }

    #[test]
    fn csp_round_trips(csp in csp()) {
        let codec = Codec::embedded_ignoring_env().unwrap();
        check_round_trip(&codec, &csp)?;
    }

    #[test]
    fn low_assign_resources_round_trips(
        subarray_id in 1u8..=16,
        beams in prop::collection::vec((1u8..=48, prop::collection::vec(1u16..=512, 1..4), 1u16..100), 0..4),
    ) {
        let codec = Codec::embedded_ignoring_env().unwrap();
        let mccs = MccsAllocation {
            subarray_beam_ids: beams.iter().map(|b| b.0).collect(),
            station_ids: beams.iter().map(|b| b.1.clone()).collect(),
            channel_blocks: beams.iter().map(|b| b.2).collect(),
        };
        let request = LowAssignResourcesRequest::new(subarray_id, mccs).unwrap();
        check_round_trip(&codec, &request)?;
    }

    #[test]
    fn sky_coordinate_frame_is_case_folded(frame in "(?i)(icrs|altaz|horizon)", c1 in -180.0f64..180.0, c2 in -90.0f64..90.0) {
        let target = SubarrayBeamTarget::new(&frame, c1, c2);
        let value = serde_json::to_value(&target).unwrap();
        prop_assert_eq!(value["reference_frame"].as_str().unwrap(), frame.to_ascii_uppercase());
        let back: SubarrayBeamTarget = serde_json::from_value(value).unwrap();
        prop_assert_eq!(back, target);
    }
}
