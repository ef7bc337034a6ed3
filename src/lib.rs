pub mod configuration;

pub mod instrument {
    pub mod instrumenterror;

    pub mod interestrate {
        pub mod vanillaswap;
    }

    pub mod leg {
        pub mod coupon;
        pub mod fixedrateleg;
        pub mod floatingrateleg;
    }

    pub mod ratehelper {
        pub mod ratehelper;
        pub mod depositratehelper;
        pub mod fraratehelper;
        pub mod futuresratehelper;
        pub mod swapratehelper;
    }
}

pub mod interestrate {
    pub mod compounding;
    pub mod index {
        pub mod iborindex;
    }
}

pub mod market {
    pub mod market;
    pub mod quote;
    pub mod quoteerror;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod piecewisepolynomial;
        }
    }
    pub mod solver {
        pub mod brentsolver;
    }
}

pub mod model {
    pub mod interestrate {
        pub mod bootstrapsettings;
        pub mod curveerror;
        pub mod interestratecurve;
        pub mod flatforwardcurve;
        pub mod flatforwardnodes;
        pub mod piecewiseflatforward;
        pub mod termstructurehandle;
    }
}

pub mod observer {
    pub mod observer;
}

pub mod time {
    pub mod utility;
    pub mod period;
    pub mod businessdayadjuster;

    pub mod recurringholiday {
        pub mod recurringholiday;
        pub mod fixeddateholiday;
        pub mod easterrelatedholiday;
    }

    pub mod calendar {
        pub mod holidaycalendar;
        pub mod simplecalendar;
        pub mod target;
    }

    pub mod schedule {
        pub mod scheduleperiod;
        pub mod generationdirection;
        pub mod scheduleerror;
        pub mod schedule;
    }

    pub mod daycounter {
        pub mod daycounter;
        pub mod constdaycounterdominator;
        pub mod numerator {
            pub mod actualnumerator;
            pub mod thirtynumerator;
        }
    }
}

pub mod value {
    pub mod cashflows;
}
