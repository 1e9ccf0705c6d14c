use chrono::{TimeZone, Utc};
use http::Method;
use pretty_assertions::assert_eq;
use qingsign_core::time::DateTime;
use qingsign_core::ErrorKind;
use qingsign_iaas::{
    canonical_query_string, sign, string_to_sign, Credential, ParameterIter, ParameterSet,
    RequestBuilder,
};

const DEMO_SIGNATURE: &str = "32bseYy39DOlatuewpeuW5vpmW51sD1A/JdGynqSpP8=";

fn demo_time() -> DateTime {
    Utc.with_ymd_and_hms(2013, 8, 27, 14, 30, 10).unwrap()
}

fn demo_credential() -> Credential {
    Credential::new("QYACCESSKEYIDEXAMPLE", "SECRETACCESSKEY")
}

#[test]
fn test_demo_request_signature() {
    let req = RequestBuilder::new(Method::GET, Some(&demo_credential()), demo_time())
        .unwrap()
        .action("RunInstances")
        .parameter("count", 1)
        .parameter("image_id", "centos64x86a")
        .parameter("instance_name", "demo")
        .parameter("instance_type", "small_b")
        .parameter("login_mode", "passwd")
        .parameter("login_passwd", "QingCloud20130712")
        .parameter_list("vxnets", ["vxnet-0"])
        .zone("pek1")
        .build()
        .unwrap();

    assert_eq!(req.params().get("signature"), Some(DEMO_SIGNATURE));
}

#[test]
fn test_insertion_order_does_not_matter() {
    let forward = RequestBuilder::new(Method::GET, Some(&demo_credential()), demo_time())
        .unwrap()
        .action("DescribeInstances")
        .zone("pek3")
        .parameter("limit", 20)
        .parameter("offset", 40)
        .build()
        .unwrap();
    let backward = RequestBuilder::new(Method::GET, Some(&demo_credential()), demo_time())
        .unwrap()
        .parameter("offset", 40)
        .parameter("limit", 20)
        .zone("pek3")
        .action("DescribeInstances")
        .build()
        .unwrap();

    assert_eq!(forward, backward);
    assert_eq!(forward.query_string(), backward.query_string());
}

#[test]
fn test_sign_is_deterministic() {
    let params: ParameterSet = [("action", "DescribeZones"), ("b", "2"), ("a", "1")]
        .into_iter()
        .collect();

    let first = sign(&Method::GET, "/iaas/", &params, "secret").unwrap();
    let second = sign(&Method::GET, "/iaas/", &params, "secret").unwrap();
    assert_eq!(first, second);

    let other = sign(&Method::GET, "/iaas/", &params, "other-secret").unwrap();
    assert_ne!(first, other);
}

#[test]
fn test_string_to_sign_layout() {
    let params: ParameterSet = [("b", "x y"), ("a", "1")].into_iter().collect();

    let cqs = canonical_query_string(&params).unwrap();
    assert_eq!(cqs, "a=1&b=x%20y");
    assert_eq!(
        string_to_sign(&Method::POST, "/iaas/", &cqs),
        "POST\n/iaas/\na=1&b=x%20y"
    );
}

#[test]
fn test_keys_sort_by_bytes() {
    let params: ParameterSet = [("a_b", "1"), ("a.b", "2"), ("aB", "3"), ("ab", "4")]
        .into_iter()
        .collect();

    assert_eq!(
        canonical_query_string(&params).unwrap(),
        "a.b=2&aB=3&a_b=1&ab=4"
    );
}

fn keys(iter: ParameterIter<'_>) -> Vec<&str> {
    iter.map(|(k, _)| k).collect()
}

#[test]
fn test_iterate_signed_parameters() {
    let req = RequestBuilder::new(Method::GET, Some(&demo_credential()), demo_time())
        .unwrap()
        .action("DescribeZones")
        .build()
        .unwrap();

    assert_eq!(
        keys(req.params().iter()),
        vec![
            "access_key_id",
            "action",
            "signature",
            "signature_method",
            "signature_version",
            "time_stamp",
            "version",
        ]
    );
    assert!(req
        .query_string()
        .rsplit('&')
        .next()
        .unwrap()
        .starts_with("signature="));
}

#[test]
fn test_empty_parameters_cannot_be_signed() {
    let err = canonical_query_string(&ParameterSet::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
}

#[test]
fn test_signature_is_encoded_on_the_wire() {
    let req = RequestBuilder::new(Method::GET, Some(&demo_credential()), demo_time())
        .unwrap()
        .action("DescribeZones")
        .parameter("description", "a+b c")
        .build()
        .unwrap();
    let http_req = req
        .to_http_request("https://api.qingcloud.com:443")
        .unwrap();

    let query = http_req.uri().query().unwrap();
    assert!(query.contains("description=a%2Bb%20c"));
    assert!(!query.contains(' '));

    let signature = req.params().get("signature").unwrap();
    let decoded: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    assert!(decoded
        .iter()
        .any(|(k, v)| k == "signature" && v == signature));
}
