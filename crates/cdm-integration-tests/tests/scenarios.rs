//! # Wire Scenarios
//!
//! Exact JSON text for representative messages in both key layouts, and
//! the error kinds raised for documents the object model rejects.

use cdm_codec::{Codec, CodecError, Validation};
use cdm_core::{FieldValidationError, Strictness};
use cdm_messages::{
    AssignResourcesRequest, CbfConfiguration, CommonConfiguration, ConfigureRequest, CspConfiguration,
    DishAllocation, DishConfiguration, FspConfiguration, FspFunctionMode, LowAssignResourcesRequest,
    MccsAllocation, MidCbfConfiguration, PointingConfiguration, PointingCorrection, ReceiverBand,
    ReleaseResourcesRequest, ScanRequest, SdpScanConfiguration, SubarrayConfiguration, Target,
    TmcConfiguration,
};
use chrono::Duration;
use serde_json::json;

const ASSIGN_2_1: &str = "https://schema.skao.int/ska-tmc-assignresources/2.1";
const RELEASE_2_1: &str = "https://schema.skao.int/ska-tmc-releaseresources/2.1";
const CONFIGURE_2_3: &str = "https://schema.skao.int/ska-tmc-configure/2.3";
const CSP_1_0: &str = "https://schema.skao.int/ska-csp-configure/1.0";
const CSP_2_0: &str = "https://schema.skao.int/ska-csp-configure/2.0";
const LOW_ASSIGN_4_0: &str = "https://schema.skao.int/ska-low-tmc-assignresources/4.0";

fn codec() -> Codec {
    Codec::embedded_ignoring_env().unwrap()
}

fn all_error() -> Validation {
    Validation::with_strictness(Strictness::AllError)
}

fn science_csp() -> CspConfiguration {
    let mut common = CommonConfiguration::new("sbi-mvp01-20200325-00001-science_A", ReceiverBand::Band1);
    common.subarray_id = Some(1);
    CspConfiguration {
        interface: Some(CSP_2_0.to_string()),
        subarray: Some(SubarrayConfiguration {
            subarray_name: "science period 23".to_string(),
        }),
        common: Some(common),
        cbf: Some(CbfConfiguration {
            fsp: vec![
                FspConfiguration::new(1, FspFunctionMode::Corr, 1, 1, 0)
                    .unwrap()
                    .with_channel_averaging_map(vec![(0, 2), (744, 0)])
                    .unwrap(),
                FspConfiguration::new(2, FspFunctionMode::Corr, 2, 1, 1).unwrap(),
            ],
        }),
        ..CspConfiguration::default()
    }
}

fn science_configure() -> ConfigureRequest {
    ConfigureRequest {
        interface: Some(CONFIGURE_2_3.to_string()),
        transaction_id: None,
        pointing: Some(PointingConfiguration {
            target: Some(Target::icrs("Polaris Australis", "21:08:47.92", "-88:57:22.9")),
            correction: Some(PointingCorrection::Maintain),
        }),
        dish: Some(DishConfiguration {
            receiver_band: ReceiverBand::Band1,
        }),
        csp: Some(science_csp()),
        sdp: Some(SdpScanConfiguration::new("science_A")),
        tmc: Some(TmcConfiguration::with_scan_duration(Duration::seconds(10))),
    }
}

// =========================================================================
// Legacy layout
// =========================================================================

#[test]
fn legacy_assign_resources() {
    let codec = codec();
    let request = AssignResourcesRequest::new(1, DishAllocation::new(["0001", "0002"])).unwrap();

    let text = codec.dumps(&request).unwrap();
    assert_eq!(text, r#"{"subarrayID":1,"dish":{"receptorIDList":["0001","0002"]}}"#);
    assert_eq!(codec.loads::<AssignResourcesRequest>(&text).unwrap(), request);
}

#[test]
fn legacy_release_all() {
    let codec = codec();
    let request = ReleaseResourcesRequest::all(1).unwrap();

    let text = codec.dumps(&request).unwrap();
    assert_eq!(text, r#"{"subarrayID":1,"releaseALL":true}"#);
    assert_eq!(codec.loads::<ReleaseResourcesRequest>(&text).unwrap(), request);
}

#[test]
fn release_all_drops_the_dish_list() {
    let codec = codec();
    let request = ReleaseResourcesRequest::new(1, true, Some(DishAllocation::new(["0001"]))).unwrap();

    let text = codec.dumps(&request).unwrap();
    assert_eq!(text, r#"{"subarrayID":1,"releaseALL":true}"#);
    let back: ReleaseResourcesRequest = codec.loads(&text).unwrap();
    assert!(back.release_all);
    assert_eq!(back.dish, None);
}

#[test]
fn legacy_scan_duration() {
    let codec = codec();
    let request = ScanRequest::with_duration(Duration::milliseconds(123_450));

    let text = codec.dumps(&request).unwrap();
    assert_eq!(text, r#"{"scanDuration":123.45}"#);
    let back: ScanRequest = codec.loads(&text).unwrap();
    assert_eq!(back.scan_duration, Some(Duration::milliseconds(123_450)));
}

#[test]
fn legacy_csp_names_config_id_id() {
    let codec = codec();
    let csp = CspConfiguration {
        interface: Some(CSP_1_0.to_string()),
        common: Some(CommonConfiguration::new("sbi-mvp01-20200325-00001-science_A", ReceiverBand::Band2)),
        ..CspConfiguration::default()
    };

    let value = codec.to_value(&csp, all_error()).unwrap();
    assert_eq!(
        value,
        json!({
            "interface": CSP_1_0,
            "common": {"id": "sbi-mvp01-20200325-00001-science_A", "frequency_band": "2"}
        })
    );
    let text = serde_json::to_string(&value).unwrap();
    assert_eq!(codec.loads_with::<CspConfiguration>(&text, all_error()).unwrap(), csp);
}

// =========================================================================
// Current layout
// =========================================================================

#[test]
fn current_assign_resources_validates_at_all_error() {
    let codec = codec();
    let request = AssignResourcesRequest::new(1, DishAllocation::new(["SKA001", "SKA036"]))
        .unwrap()
        .with_interface(ASSIGN_2_1)
        .with_transaction_id("txn-local-20200325-00001");

    let text = codec.dumps_with(&request, all_error()).unwrap();
    assert_eq!(
        text,
        format!(
            r#"{{"interface":"{ASSIGN_2_1}","transaction_id":"txn-local-20200325-00001","subarray_id":1,"dish":{{"receptor_ids":["SKA001","SKA036"]}}}}"#
        )
    );
    assert_eq!(
        codec.loads_with::<AssignResourcesRequest>(&text, all_error()).unwrap(),
        request
    );
}

#[test]
fn current_release_lists_receptors_at_top_level() {
    let codec = codec();
    let request = ReleaseResourcesRequest::new(2, false, Some(DishAllocation::new(["SKA001"])))
        .unwrap()
        .with_interface(RELEASE_2_1);

    let text = codec.dumps_with(&request, all_error()).unwrap();
    assert_eq!(
        text,
        format!(r#"{{"interface":"{RELEASE_2_1}","subarray_id":2,"receptor_ids":["SKA001"]}}"#)
    );
    assert_eq!(
        codec.loads_with::<ReleaseResourcesRequest>(&text, all_error()).unwrap(),
        request
    );
}

#[test]
fn configure_with_nested_csp_validates_at_all_error() {
    let codec = codec();
    let request = science_configure();

    let value = codec.to_value(&request, all_error()).unwrap();
    assert_eq!(value["pointing"]["target"]["reference_frame"], json!("ICRS"));
    assert_eq!(value["csp"]["common"]["config_id"], json!("sbi-mvp01-20200325-00001-science_A"));
    assert_eq!(value["csp"]["cbf"]["fsp"][0]["channel_averaging_map"], json!([[0, 2], [744, 0]]));
    assert_eq!(value["tmc"], json!({"scan_duration": 10.0}));

    let text = serde_json::to_string(&value).unwrap();
    assert_eq!(codec.loads_with::<ConfigureRequest>(&text, all_error()).unwrap(), request);
}

#[test]
fn low_assign_resources_validates_at_all_error() {
    let codec = codec();
    let request = LowAssignResourcesRequest::new(
        1,
        MccsAllocation {
            subarray_beam_ids: vec![1],
            station_ids: vec![vec![1, 2]],
            channel_blocks: vec![3],
        },
    )
    .unwrap()
    .with_interface(LOW_ASSIGN_4_0);

    let text = codec.dumps_with(&request, all_error()).unwrap();
    assert_eq!(
        text,
        format!(
            r#"{{"interface":"{LOW_ASSIGN_4_0}","subarray_id":1,"mccs":{{"subarray_beam_ids":[1],"station_ids":[[1,2]],"channel_blocks":[3]}}}}"#
        )
    );
    assert_eq!(
        codec.loads_with::<LowAssignResourcesRequest>(&text, all_error()).unwrap(),
        request
    );
}

// =========================================================================
// Pointing target union
// =========================================================================

#[test]
fn target_tag_is_case_insensitive_and_emitted_upper_case() {
    let codec = codec();
    let text = r#"{"pointing":{"target":{"reference_frame":"icrs","target_name":"M83","ra":"13:37:00.9","dec":"-29:51:57"}}}"#;

    let request: ConfigureRequest = codec.loads(text).unwrap();
    let target = request.pointing.as_ref().and_then(|p| p.target.as_ref()).unwrap();
    assert_eq!(target, &Target::icrs("M83", "13:37:00.9", "-29:51:57"));

    let value = codec.to_value(&request, Validation::default()).unwrap();
    assert_eq!(value["pointing"]["target"]["reference_frame"], json!("ICRS"));
}

#[test]
fn untagged_target_is_resolved_by_shape() {
    let codec = codec();
    let request: ConfigureRequest = codec.loads(r#"{"pointing":{"target":{"az":180.0,"el":45.0}}}"#).unwrap();
    let target = request.pointing.and_then(|p| p.target).unwrap();
    assert_eq!(target.reference_frame(), "ALTAZ");
}

#[test]
fn unknown_target_tag_is_rejected() {
    let err = codec()
        .loads::<ConfigureRequest>(r#"{"pointing":{"target":{"reference_frame":"galactic","l":1.0,"b":2.0}}}"#)
        .unwrap_err();
    assert!(matches!(
        err,
        CodecError::FieldValidation(FieldValidationError::Malformed {
            message_type: "ConfigureRequest",
            ..
        })
    ));
}

// =========================================================================
// Object-model rejections
// =========================================================================

#[test]
fn unknown_function_mode_is_malformed() {
    let text = r#"{"cbf":{"fsp":[{"fsp_id":1,"function_mode":"FOO","frequency_slice_id":1,"integration_factor":1,"zoom_factor":0}]}}"#;
    let err = codec().loads::<CspConfiguration>(text).unwrap_err();
    assert!(matches!(
        err,
        CodecError::FieldValidation(FieldValidationError::Malformed {
            message_type: "CspConfiguration",
            ..
        })
    ));
}

#[test]
fn out_of_range_fsp_is_rejected_on_parse() {
    let text = r#"{"cbf":{"fsp":[{"fsp_id":28,"function_mode":"CORR","frequency_slice_id":1,"integration_factor":1,"zoom_factor":0}]}}"#;
    let err = codec().loads::<CspConfiguration>(text).unwrap_err();
    assert!(matches!(
        err,
        CodecError::FieldValidation(FieldValidationError::OutOfRange { field: "fsp_id", .. })
    ));
}

#[test]
fn cbf_and_midcbf_are_mutually_exclusive() {
    let mut csp = science_csp();
    csp.midcbf = Some(MidCbfConfiguration::default());
    let err = codec().dumps_with(&csp, Validation::disabled()).unwrap_err();
    assert!(matches!(
        err,
        CodecError::FieldValidation(FieldValidationError::MutuallyExclusive {
            first: "cbf",
            second: "midcbf",
            ..
        })
    ));
}

#[test]
fn partial_release_requires_a_dish() {
    let err = codec().loads::<ReleaseResourcesRequest>(r#"{"subarrayID":1}"#).unwrap_err();
    assert!(matches!(
        err,
        CodecError::FieldValidation(FieldValidationError::MissingField {
            message_type: "ReleaseResourcesRequest",
            field: "dish",
        })
    ));
}

#[test]
fn subarray_id_out_of_range_is_rejected() {
    assert!(AssignResourcesRequest::new(17, DishAllocation::new(["0001"])).is_err());
    let err = codec()
        .loads::<AssignResourcesRequest>(r#"{"subarrayID":0,"dish":{"receptorIDList":["0001"]}}"#)
        .unwrap_err();
    assert!(matches!(
        err,
        CodecError::FieldValidation(FieldValidationError::OutOfRange { field: "subarray_id", .. })
    ));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = codec().loads::<ScanRequest>(r#"{"scan_id": 1"#).unwrap_err();
    assert!(matches!(err, CodecError::MessageParse(_)));
}
