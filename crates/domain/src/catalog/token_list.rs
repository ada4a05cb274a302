use crate::address::{Address, ZERO_ADDRESS};
use crate::entities::token::Token;
use crate::network::Network::{self, Base, Bnb, Ethereum, Scroll, Sepolia, Unichain};

const TRUST_WALLET_ETH: &str =
    "https://raw.githubusercontent.com/trustwallet/assets/master/blockchains/ethereum";

fn on(deployments: &[(Network, &str)]) -> Vec<(Network, Address)> {
    deployments
        .iter()
        .map(|(network, address)| (*network, Address::new(address)))
        .collect()
}

fn trust_wallet_logo(mainnet_address: &str) -> String {
    format!("{TRUST_WALLET_ETH}/assets/{mainnet_address}/logo.png")
}

/// Tokens shipped with the binary.
pub(crate) fn builtin_tokens() -> Vec<Token> {
    vec![
        Token::new(
            "1",
            "Ethereum",
            "ETH",
            18,
            on(&[
                (Ethereum, ZERO_ADDRESS),
                (Scroll, ZERO_ADDRESS),
                (Sepolia, ZERO_ADDRESS),
                (Base, ZERO_ADDRESS),
                (Unichain, ZERO_ADDRESS),
                (Bnb, "0x2170Ed0880ac9A755fd29B2688956BD959F933F8"),
            ]),
        )
        .with_logo(format!("{TRUST_WALLET_ETH}/info/logo.png")),
        Token::new(
            "2",
            "Wrapped Ethereum",
            "WETH",
            18,
            on(&[
                (Ethereum, "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
                (Scroll, "0x5300000000000000000000000000000000000004"),
                (Sepolia, "0xfFf9976782d46CC05630D1f6eBAb18b2324d6B14"),
                (Base, "0x4200000000000000000000000000000000000006"),
                (Unichain, "0x4200000000000000000000000000000000000006"),
            ]),
        )
        .with_logo(trust_wallet_logo("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")),
        Token::new(
            "3",
            "Tether",
            "USDT",
            6,
            on(&[
                (Ethereum, "0xdAC17F958D2ee523a2206206994597C13D831ec7"),
                (Scroll, "0xf55BEC9cafDbE8730f096Aa55dad6D22d44099Df"),
                (Base, "0xfde4C96c8593536E31F229EA8f37b2ADa2699bb2"),
                (Bnb, "0x55d398326f99059fF775485246999027B3197955"),
            ]),
        )
        .with_decimals_on(Bnb, 18)
        .with_logo(trust_wallet_logo("0xdAC17F958D2ee523a2206206994597C13D831ec7")),
        Token::new(
            "4",
            "USDC",
            "USDC",
            6,
            on(&[
                (Ethereum, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
                (Scroll, "0x06eFdBFf2a14a7c8E15944D1F4A48F9F95F663A4"),
                (Sepolia, "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"),
                (Base, "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
                (Unichain, "0x078D782b760474a361dDA0AF3839290b0EF57AD6"),
                (Bnb, "0x8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d"),
            ]),
        )
        .with_decimals_on(Bnb, 18)
        .with_logo(trust_wallet_logo("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")),
        Token::new(
            "5",
            "Wrapped Bitcoin",
            "WBTC",
            8,
            on(&[
                (Ethereum, "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
                (Scroll, "0x3c1bca5a656e69edcd0d4e36bebb3fcdaca60cf1"),
            ]),
        )
        .with_logo(trust_wallet_logo("0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599")),
        Token::new(
            "6",
            "Coinbase Wrapped Bitcoin",
            "cbBTC",
            8,
            on(&[
                (Ethereum, "0xcbB7C0000aB88B473b1f5aFd9ef808440eed33Bf"),
                (Base, "0xcbB7C0000aB88B473b1f5aFd9ef808440eed33Bf"),
            ]),
        )
        .with_logo("https://s2.coinmarketcap.com/static/img/coins/200x200/32994.png"),
        Token::new(
            "7",
            "DAI",
            "DAI",
            18,
            on(&[
                (Ethereum, "0x6b175474e89094c44da98b954eedeac495271d0f"),
                (Scroll, "0xca77eb3fefe3725dc33bccb54edefc3d9f764f97"),
                (Base, "0x50c5725949A6F0c72E6C4a641F24049A917DB0Cb"),
            ]),
        )
        .with_logo(trust_wallet_logo("0x6B175474E89094C44Da98b954EedeAC495271d0F")),
        Token::new(
            "8",
            "tBTC",
            "tBTC",
            18,
            on(&[
                (Ethereum, "0x18084fbA666a33d37592fA2633fD49a74DD93a88"),
                (Base, "0x236aa50979d5f3de3bd1eeb40e81137f22ab794b"),
            ]),
        )
        .with_logo("https://s2.coinmarketcap.com/static/img/coins/200x200/26133.png"),
        Token::new(
            "9",
            "Lombard Staked BTC",
            "LBTC",
            8,
            on(&[
                (Ethereum, "0x8236a87084f8B84306f72007F36F2618A5634494"),
                (Base, "0xecac9c5f704e954931349da37f60e39f515c11c1"),
            ]),
        )
        .with_logo("https://img.cryptorank.io/coins/lombard_staked_btc1725876587975.png"),
        Token::new(
            "10",
            "Uniswap",
            "UNI",
            18,
            on(&[
                (Ethereum, "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984"),
                (Scroll, "0x434cdA25E8a2CA5D9c1C449a8Cb6bCbF719233E8"),
                (Sepolia, "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
                (Base, "0xc3De830EA07524a0761646a6a4e4be0e114a3C83"),
            ]),
        )
        .with_logo(trust_wallet_logo("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984")),
        Token::new(
            "11",
            "Chainlink",
            "LINK",
            18,
            on(&[
                (Ethereum, "0x514910771af9ca656af840dff83e8264ecf986ca"),
                (Sepolia, "0x779877A7B0D9E8603169DdbD7836e478b4624789"),
                (Base, "0x88Fb150BDc53A65fe94Dea0c9BA0a6dAf8C6e196"),
            ]),
        )
        .with_logo(trust_wallet_logo("0x514910771AF9Ca656af840dff83E8264EcF986CA")),
        Token::new(
            "12",
            "Aave",
            "AAVE",
            18,
            on(&[
                (Ethereum, "0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9"),
                (Scroll, "0x79379c0e09a41d7978f883a56246290ee9a8c4d3"),
                (Sepolia, "0x88541670E55cC00bEEFD87eB59EDd1b7C511AC9a"),
                (Base, "0x63706e401c06ac8513145b7687A14804d17f814b"),
            ]),
        )
        .with_logo(trust_wallet_logo("0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9")),
        Token::new(
            "13",
            "Scroll",
            "SCR",
            18,
            on(&[(Scroll, "0xd29687c813D741E2F938F4aC377128810E217b1b")]),
        )
        .with_logo("https://s2.coinmarketcap.com/static/img/coins/200x200/26998.png"),
        Token::new(
            "14",
            "EURC",
            "EURC",
            6,
            on(&[
                (Ethereum, "0x1abaea1f7c830bd89acc67ec4af516284b1bc33c"),
                (Base, "0x60a3e35cc302bfa44cb288bc5a4f316fdb1adb42"),
            ]),
        )
        .with_logo(trust_wallet_logo("0x1aBaEA1f7C830bD89Acc67eC4af516284b1bC33c")),
        Token::new("15", "BNB", "BNB", 18, on(&[(Bnb, ZERO_ADDRESS)])).with_logo(concat!(
            "https://raw.githubusercontent.com/trustwallet/assets/master",
            "/blockchains/smartchain/info/logo.png"
        )),
        Token::new(
            "16",
            "Wrapped BNB",
            "WBNB",
            18,
            on(&[(Bnb, "0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c")]),
        ),
        Token::new(
            "19",
            "Binance Bitcoin",
            "BTCB",
            18,
            on(&[(Bnb, "0x7130d2A12B9BCbFAe4f2634d864A1Ee1Ce3Ead9c")]),
        ),
    ]
}
