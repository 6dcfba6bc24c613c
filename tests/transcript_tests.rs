//! Transcript symmetry: independently-constructed AP and STA contexts must
//! hash to the same value once role-swapped session fields are accounted
//! for.

use sae_pk::{SaeConfirmContext, SaeGroup};

fn ap_and_sta_contexts() -> (SaeConfirmContext, SaeConfirmContext) {
    let ap_elem = vec![0xAAu8; 64];
    let sta_elem = vec![0xBBu8; 64];
    let ap_sca = vec![0x11u8; 32];
    let sta_sca = vec![0x22u8; 32];
    let ap_addr = [0x02, 0, 0, 0, 0, 0xAA];
    let sta_addr = [0x02, 0, 0, 0, 0, 0xBB];

    let ap_ctx = SaeConfirmContext::new(
        SaeGroup::Group19,
        ap_elem.clone(),
        sta_elem.clone(),
        ap_sca.clone(),
        sta_sca.clone(),
        ap_addr,
        sta_addr,
    )
    .unwrap();

    let sta_ctx = SaeConfirmContext::new(SaeGroup::Group19, sta_elem, ap_elem, sta_sca, ap_sca, sta_addr, ap_addr)
        .unwrap();

    (ap_ctx, sta_ctx)
}

#[test]
fn transcript_hash_is_symmetric_across_roles() {
    let (ap_ctx, sta_ctx) = ap_and_sta_contexts();
    let m = [0x42u8; 16];
    let pubkey = vec![0x77u8; 91];

    let ap_hash = sae_pk::transcript::transcript_hash(&ap_ctx, true, &m, &pubkey).unwrap();
    let sta_hash = sae_pk::transcript::transcript_hash(&sta_ctx, false, &m, &pubkey).unwrap();

    assert_eq!(ap_hash, sta_hash);
}

#[test]
fn transcript_hash_length_matches_group() {
    let (ap_ctx, _) = ap_and_sta_contexts();
    let hash = sae_pk::transcript::transcript_hash(&ap_ctx, true, &[0u8; 16], &[1u8; 10]).unwrap();
    assert_eq!(hash.len(), SaeGroup::Group19.hash_len());
}
