//! # Shared Fixtures
//!
//! The published Falcon-512 test vector, the KAT file shipped with this crate,
//! and a generator for synthetic vectors at every degree.
//!
//! Synthetic vectors pick `h = c + e` for a short random `e`, so `s2 = 1`
//! gives `s1 = e`. They exercise every encoding and degree without a signer.

use falcon_verifier::domain::codec;
use falcon_verifier::domain::header::signature_header_byte;
use falcon_verifier::domain::lattice::hash_to_point;
use falcon_verifier::domain::params::{LogN, NONCE_LEN, Q};
use falcon_verifier::SignatureLayout;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// Falcon-512 compressed signature (header `0x39`), 658 bytes.
pub const FALCON512_SIGNATURE_HEX: &str = concat!(
    "390191EF48486EB9D9A6823D8E6FF0D7F4DF8BED13AF7FA55A7E8DFA0D197258",
    "42A5451BCF4C061982D021C63A7D666C2024FE57033B1A1BDA8C2179C518C94D",
    "434947EACC109EFE792857FF6450CC853E8BB9D5D951B3DDB1397FADC2210762",
    "B479E386E660A68EB2AD034A58A3D0CCE2370EDF257FF4F81FE97C9BB10C1A96",
    "EE87D2414FDF4EA39F9F7C0604D1A3AEBE5D73A6A1F7221A99EB2389B905DA94",
    "766CD27A9A89F13D56B97CDD346689CFC5B3BDBBDC5102D3B5F93A2A95BE40AF",
    "CAAC416D831391474C2298DA0A359BC958A5F227DE991A338944D6EBE4963F1A",
    "4BA5BB3D5C672526992329C84C5770C03A5E43504A28FA86F3B9BD72354C0B19",
    "21D1B568E5212856D8436F79A8C409E631082A4E28B7CB99D89C2A9AB3C196C5",
    "6A77E6D05718196B316D8E9BEDCFC214E2A33C02F0AFD821DBFCB966C8BB8DDE",
    "01C812A2045B6BC8DE767F97B739DC8ED262F43DFC092E49F34C7728839895E4",
    "620620E4A193E94DBF2A9D439E249E6EC3377ED6734030ACD43D138B982C36DF",
    "814A4257F971A53AA5D92A7670915469013E68124EDAE3FC11B4CA470938EE2F",
    "218BC0E11468A6092F233DE914790C972F77D95F968AC5F6E0968E0EFA8D6288",
    "25F3FBAD2254E04E9BA34DEFC698B2E19E9629290F4E5682270595035B07404B",
    "091F5325293ED4021C619D7F0914AC47219B9E5DF6FDA5ACBB398ADB5C8540DC",
    "3390A548D82BE42FAC8F6EF9963546BCF278E63FDD49D0ABBE62208E39564687",
    "71DF4A50DD7A3AA197D81F58C14425EE166D29AEF3EB2C171FF9B24F575E0AE9",
    "A65227D1E57AB6C5DF11A369645DAC717AB671A4C10AEF72824134D0E68676BB",
    "138CA20EB5E08A0D1F90EE48AF1CCE1F21C72394AC427F382CED545183689CDB",
    "72CEC8EA30C77389A16204356259E4B1142D",
);

/// Message signed by [`FALCON512_SIGNATURE_HEX`], 100 bytes.
pub const FALCON512_MESSAGE_HEX: &str = concat!(
    "486C8E99DE7F81A3B0F4610BB555BE687D67E079F5B03EE9D18C21D766FE3D2D",
    "36EA378A89294F839DC9BCD9A8251F92CFD39AACC1E228F44442E95B3C59EF90",
    "4613ECE9D312028B07A3CB26B3C9844DCDB2699299D7D47FD63F7889D6C5CE34",
    "626B583A",
);

/// Falcon-512 public key (header `0x09`), 897 bytes.
pub const FALCON512_PUBLIC_KEY_HEX: &str = concat!(
    "09B7107F987F937EA7566BCA38E1578B8D0B59294E68BD208BFA90133101F5EF",
    "D8755E9F1FD20564762585BAA5A4F165EBEC6DF80AB5248A22BBA940A7754ABE",
    "5329B5C60345F395AD2A33AC106E65F14B91D0DCA308AE4CC6DB5FE69EEE9FE4",
    "A392FF64F52865070EB5587E7F83AB6C187CC0584B3552920A3D4B50AB0A4A1E",
    "8D9DEA3D4B5EB015A2F4AB59AE3D0AD2C081D8D2428A83806DE7973EC65975FF",
    "8FD7287C642B6A83250255B61838CB4D68C52600B8C5330FCE48AAEB806D4FB9",
    "9A9ADD5E56577454A5A5AD5699711DD04854BF11484713DEA5D9ABD17F9214C3",
    "3C4F4D47A6600BC241011F52E29D9820AC85AB70DFCCB1D08C003B489C0826BF",
    "28CCEE71945637B7161E6A99584451BF8351A43A0B0755CE3044F0840B7AD048",
    "9E6572C896666463E2CFC8EBE1258E3A963AB1433B173865705C15F044BCFDE1",
    "B780D29E422604A9081D2349F6D6B40671B7C6AE77F44C16A22412E9E32CB116",
    "363D99CA4D2C3ACE6730FD45FC6612D389EDCD1C9B2201BA32A4705FAC61005E",
    "184B89A4C90983ACD7AFEE694AC9D904473EB512EC2D4875C1C954B791506F02",
    "C9E65F5D04976EA4E81D22D4884EB1C47EEB1A7EE109E12E61CE0EE4DFA88FDA",
    "CB78ED61B0A327C2069D8CD33D184E68A60C22F6804FACECA968CF5C1C276C7D",
    "16386F38BB82D5EA1E11D801F5EF33D3A3B0171DC870741CE8373C779AE89352",
    "11348C436285703681F1E6B0ADC05C35C56196C246731EE2A4A998EF918A1650",
    "23A76D324C58419CD9E76EBCA0E13823D90B2EBC641717B404E2EE2937D48B38",
    "441E88F1086C15C95DE8A48632BEE5FB56F99F07AC31037323000317C291E2EA",
    "CE7865ECE23548E804679241F1366748B1656CD58C28B86D5E08E269D0E3A668",
    "A834F4178A188DD63384042773FAC10B3D96F533ECABE3A8A27E091D5846D6EA",
    "D8AC9241437240AD4F7D274B78403402210AD042DDF73D59E02ABF657AA41E10",
    "1455DF638D44C181E4CA219F2C6679088FF11AF439115D8EF38F3614B957E1EB",
    "B9CC2E6BEE0C0664DA7BA3F1268404A5BAC8ED45854881972382908861CC7F14",
    "F5D03B112273917854617590AAD70EEEDF398CB206FF5C7F7A9C5390DFA27E14",
    "B1148518833B3375CDFAF5A73680CDD7D0EA5F664672FE91AE6700032A3EE21A",
    "EB3AB7B6A0F66B0F65597A7FB6F5C1A9B1459D48885DB3734ABEC9918C0F3A81",
    "35BBB2279984A054115E9C12A8F10CA25B93BE8A3ACFB94DC6A90D4DA0E0A7AD",
    "A8",
);

fn decode(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).expect("fixture hex")
}

pub fn falcon512_signature() -> Vec<u8> {
    decode(FALCON512_SIGNATURE_HEX)
}

pub fn falcon512_message() -> Vec<u8> {
    decode(FALCON512_MESSAGE_HEX)
}

pub fn falcon512_public_key() -> Vec<u8> {
    decode(FALCON512_PUBLIC_KEY_HEX)
}

/// Path of the Falcon-512 KAT response file.
pub fn kat_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("falcon512-KAT.rsp")
}

/// A signature, message and key that verify together.
#[derive(Debug, Clone)]
pub struct SyntheticVector {
    pub logn: LogN,
    pub layout: SignatureLayout,
    pub signature: Vec<u8>,
    pub message: Vec<u8>,
    pub public_key: Vec<u8>,
}

/// Build a valid vector for `logn` in the given layout.
pub fn synthesize(logn: LogN, layout: SignatureLayout, seed: u64) -> SyntheticVector {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = logn.degree();

    let message_len = rng.gen_range(1..64);
    let message: Vec<u8> = (0..message_len).map(|_| rng.gen()).collect();
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill(&mut nonce[..]);

    let c = hash_to_point(&nonce, &message, logn);
    let h: Vec<u16> = c
        .iter()
        .map(|&ci| {
            let e: i32 = rng.gen_range(-40..=40);
            (i32::from(ci) + e).rem_euclid(Q as i32) as u16
        })
        .collect();
    let public_key = codec::encode_public_key(&h, logn).expect("public key encodes");

    let mut s2 = vec![0i16; n];
    s2[0] = 1;
    let payload = match layout {
        SignatureLayout::ConstantTime => codec::encode_constant_time(&s2, logn),
        SignatureLayout::Compressed | SignatureLayout::Padded => codec::compress(&s2, logn),
    }
    .expect("s2 encodes");

    let mut signature = vec![signature_header_byte(layout.encoding(), logn)];
    signature.extend_from_slice(&nonce);
    signature.extend(payload);
    if layout == SignatureLayout::Padded {
        signature.resize(logn.sig_padded_size(), 0);
    }

    SyntheticVector {
        logn,
        layout,
        signature,
        message,
        public_key,
    }
}

/// Every supported degree.
pub fn all_logn() -> impl Iterator<Item = LogN> {
    (LogN::MIN..=LogN::MAX).filter_map(LogN::new)
}
